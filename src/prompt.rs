/// Prompt compilation
///
/// This module turns a raw user prompt plus the chosen style and aspect
/// ratio into the final request URL for the image endpoint. Everything here
/// is pure and synchronous; no network call is made and nothing verifies
/// that the endpoint will actually produce an image for the URL.

use rand::Rng;

/// Base URL of the image-generation endpoint (Pollinations.ai - free, no
/// API key needed). It accepts the prompt as a path segment and returns
/// image bytes directly for a GET request.
pub const IMAGE_API_BASE: &str = "https://image.pollinations.ai/prompt";

/// Largest seed value sent to the endpoint.
pub const MAX_SEED: u32 = 999_999;

/// Style tags offered in the form. "Auto" means no style augmentation.
pub const STYLES: &[&str] = &[
    "Auto",
    "Photorealistic",
    "Anime",
    "Digital Art",
    "Oil Painting",
    "Watercolor",
    "Cyberpunk",
    "Fantasy",
    "Minimalist",
];

/// Fixed set of aspect ratios selectable in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Widescreen,
    Portrait,
    Classic,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Square,
        AspectRatio::Widescreen,
        AspectRatio::Portrait,
        AspectRatio::Classic,
    ];

    /// The tag stored in gallery entries and shown in meta badges.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-compiled generation request, ready to become a gallery entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRequest {
    pub url: String,
    pub enhanced_prompt: String,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
}

/// Append the fixed quality suffix to the user prompt.
///
/// Two distinct templates exist; the presence of a style selects which.
pub fn enhance_prompt(prompt: &str, style: Option<&str>) -> String {
    match style {
        Some(style) => format!(
            "{prompt}, {style} style, masterpiece, high quality, highly detailed, \
             8k resolution, cinematic lighting"
        ),
        None => format!(
            "{prompt}, masterpiece, hyper-detailed, global illumination, ray tracing, 8k"
        ),
    }
}

/// Map an aspect-ratio tag to pixel dimensions.
/// Any unrecognized tag degrades to the square default.
pub fn image_dimensions(aspect_ratio: &str) -> (u32, u32) {
    match aspect_ratio {
        "1:1" => (1024, 1024),
        "16:9" => (1280, 720),
        "9:16" => (720, 1280),
        "4:3" => (1024, 768),
        _ => (1024, 1024),
    }
}

/// Draw a fresh request seed. This is the only source of variation between
/// otherwise-identical prompts; nothing guarantees the endpoint is actually
/// deterministic for a given seed.
pub fn random_seed() -> u32 {
    rand::thread_rng().gen_range(0..=MAX_SEED)
}

/// Compile a request with a freshly drawn seed.
pub fn compile_request(prompt: &str, style: Option<&str>, aspect_ratio: &str) -> CompiledRequest {
    compile_with_seed(prompt, style, aspect_ratio, random_seed())
}

/// Compile a request with an explicit seed (deterministic, used by tests).
pub fn compile_with_seed(
    prompt: &str,
    style: Option<&str>,
    aspect_ratio: &str,
    seed: u32,
) -> CompiledRequest {
    let enhanced_prompt = enhance_prompt(prompt, style);
    let (width, height) = image_dimensions(aspect_ratio);

    let url = format!(
        "{IMAGE_API_BASE}/{}?width={width}&height={height}&seed={seed}&model=turbo&nologo=true",
        urlencoding::encode(&enhanced_prompt),
    );

    CompiledRequest {
        url,
        enhanced_prompt,
        width,
        height,
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_prompt_without_style() {
        assert_eq!(
            enhance_prompt("a cat", None),
            "a cat, masterpiece, hyper-detailed, global illumination, ray tracing, 8k"
        );
    }

    #[test]
    fn test_enhanced_prompt_with_style() {
        assert_eq!(
            enhance_prompt("a cat", Some("Anime")),
            "a cat, Anime style, masterpiece, high quality, highly detailed, \
             8k resolution, cinematic lighting"
        );
    }

    #[test]
    fn test_dimension_table() {
        assert_eq!(image_dimensions("1:1"), (1024, 1024));
        assert_eq!(image_dimensions("16:9"), (1280, 720));
        assert_eq!(image_dimensions("9:16"), (720, 1280));
        assert_eq!(image_dimensions("4:3"), (1024, 768));
    }

    #[test]
    fn test_unrecognized_ratio_defaults_to_square() {
        assert_eq!(image_dimensions("21:9"), (1024, 1024));
        assert_eq!(image_dimensions(""), (1024, 1024));
    }

    #[test]
    fn test_seed_stays_in_range() {
        for _ in 0..1000 {
            assert!(random_seed() <= MAX_SEED);
        }
    }

    #[test]
    fn test_compiled_url_shape() {
        let request = compile_with_seed("a red fox", None, "16:9", 1234);

        assert_eq!(
            request.url,
            format!(
                "{IMAGE_API_BASE}/a%20red%20fox%2C%20masterpiece%2C%20hyper-detailed%2C%20\
                 global%20illumination%2C%20ray%20tracing%2C%208k\
                 ?width=1280&height=720&seed=1234&model=turbo&nologo=true"
            )
        );
        assert_eq!(request.width, 1280);
        assert_eq!(request.height, 720);
        assert_eq!(request.seed, 1234);
    }

    #[test]
    fn test_compile_is_deterministic_for_a_seed() {
        let a = compile_with_seed("dunes at dusk", Some("Watercolor"), "4:3", 77);
        let b = compile_with_seed("dunes at dusk", Some("Watercolor"), "4:3", 77);
        assert_eq!(a, b);
    }
}
