/// Network access for generated images
///
/// The image endpoint is an opaque collaborator: a GET on a compiled URL
/// returns image bytes directly, and no response schema is parsed. Both
/// operations here are fire-and-forget from the caller's perspective; the
/// results come back as messages.

use std::path::PathBuf;
use tokio::task;

/// Fetch the raw bytes of a generated image for on-screen display.
pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Request failed: {e}"))?
        .error_for_status()
        .map_err(|e| format!("Endpoint rejected the request: {e}"))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read image bytes: {e}"))?;

    Ok(bytes.to_vec())
}

/// Fetch an image and write it to `dest`.
///
/// Decoding happens before the write, so a payload that is not actually an
/// image takes the error path instead of landing on disk. The decode and
/// save run on a blocking thread because both are CPU-bound.
pub async fn export_image(url: String, dest: PathBuf) -> Result<PathBuf, String> {
    let bytes = fetch_image_bytes(url).await?;

    task::spawn_blocking(move || {
        let img = image::load_from_memory(&bytes)
            .map_err(|e| format!("Failed to decode image: {e}"))?;

        img.save(&dest)
            .map_err(|e| format!("Failed to write {}: {e}", dest.display()))?;

        Ok(dest)
    })
    .await
    .map_err(|e| format!("Task join error: {e}"))?
}

/// Last-resort export path: hand the URL to the default browser.
pub fn open_in_browser(url: &str) -> bool {
    webbrowser::open(url).is_ok()
}
