use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::Utc;
use iced::widget::image::Handle;
use iced::widget::{column, container, scrollable, stack, text, text_input};
use iced::{keyboard, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;

mod net;
mod prompt;
mod state;
mod ui;

use prompt::AspectRatio;
use state::data::{GalleryEntry, Toast, ToastKind, TOAST_FADE, TOAST_VISIBLE};
use state::gallery::Gallery;
use state::storage::Storage;

/// Main application state
struct ArtStudio {
    /// Ordered store of generated images, newest first
    gallery: Gallery,
    /// Snapshot persistence; None means the session runs memory-only
    storage: Option<Storage>,
    /// Fetched display images, keyed by entry id
    images: HashMap<u64, Handle>,
    /// Entries whose display fetch failed; their cards show a placeholder
    failed_images: HashSet<u64>,

    // Form state
    prompt_input: String,
    style: &'static str,
    aspect_ratio: AspectRatio,
    advanced_open: bool,

    // Ephemeral UI state
    is_generating: bool,
    is_exporting: bool,
    lightbox: Option<u64>,
    toasts: Vec<Toast>,
    toast_seq: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    PromptChanged(String),
    StyleSelected(&'static str),
    AspectSelected(AspectRatio),
    ToggleAdvanced,
    SubmitPrompt,
    /// A display fetch finished for the given entry id
    ImageFetched(u64, Result<Handle, String>),
    OpenLightbox(u64),
    CloseLightbox,
    EscapePressed,
    CopyPrompt(u64),
    Download,
    DownloadFinished {
        url: String,
        result: Result<PathBuf, String>,
    },
    /// The visible window of a toast elapsed; start its fade
    ToastFade(u64),
    /// The fade finished; drop the toast
    ToastExpired(u64),
}

impl ArtStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Storage failures are never fatal: the gallery simply will not
        // survive the session.
        let storage = match Storage::new() {
            Ok(storage) => Some(storage),
            Err(e) => {
                eprintln!("⚠️  Running without persistence: {e}");
                None
            }
        };

        let gallery = storage
            .as_ref()
            .map(|storage| Gallery::from_entries(storage.load_gallery()))
            .unwrap_or_default();

        println!(
            "🎨 Art Studio initialized with {} saved creations",
            gallery.count()
        );

        // Kick off display fetches for everything we reloaded
        let fetches: Vec<Task<Message>> = gallery.iter().map(Self::fetch_display_task).collect();

        (
            ArtStudio {
                gallery,
                storage,
                images: HashMap::new(),
                failed_images: HashSet::new(),
                prompt_input: String::new(),
                style: "Auto",
                aspect_ratio: AspectRatio::default(),
                advanced_open: false,
                is_generating: false,
                is_exporting: false,
                lightbox: None,
                toasts: Vec::new(),
                toast_seq: 0,
            },
            Task::batch(fetches),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PromptChanged(value) => {
                self.prompt_input = if value.chars().count() > ui::form::PROMPT_MAX_LEN {
                    value.chars().take(ui::form::PROMPT_MAX_LEN).collect()
                } else {
                    value
                };
                Task::none()
            }
            Message::StyleSelected(style) => {
                self.style = style;
                Task::none()
            }
            Message::AspectSelected(aspect_ratio) => {
                self.aspect_ratio = aspect_ratio;
                Task::none()
            }
            Message::ToggleAdvanced => {
                self.advanced_open = !self.advanced_open;
                Task::none()
            }
            Message::SubmitPrompt => {
                // Re-entrant submits are ignored; this is the only
                // concurrency guard in the app.
                if self.is_generating {
                    return Task::none();
                }

                let prompt = self.prompt_input.trim().to_string();
                if prompt.is_empty() {
                    let toast =
                        self.push_toast("Please enter a creative prompt first", ToastKind::Error);
                    return Task::batch([toast, text_input::focus(ui::form::prompt_input_id())]);
                }

                // The generation path is straight-line synchronous code, so
                // the guard release below is unconditional: the button can
                // never stick disabled.
                self.is_generating = true;
                let task = self.generate(prompt);
                self.is_generating = false;
                task
            }
            Message::ImageFetched(id, Ok(handle)) => {
                self.failed_images.remove(&id);
                self.images.insert(id, handle);
                Task::none()
            }
            Message::ImageFetched(id, Err(e)) => {
                // The entry stays in the gallery; only its card knows
                eprintln!("⚠️  Image {id} failed to load: {e}");
                self.failed_images.insert(id);
                Task::none()
            }
            Message::OpenLightbox(id) => {
                if self.gallery.get(id).is_some() {
                    self.lightbox = Some(id);
                }
                Task::none()
            }
            Message::CloseLightbox => {
                self.lightbox = None;
                Task::none()
            }
            Message::EscapePressed => {
                if self.lightbox.is_some() {
                    self.lightbox = None;
                }
                Task::none()
            }
            Message::CopyPrompt(id) => {
                let Some(prompt) = self.gallery.get(id).map(|entry| entry.prompt.clone()) else {
                    return Task::none();
                };

                match arboard::Clipboard::new()
                    .and_then(|mut clipboard| clipboard.set_text(prompt))
                {
                    Ok(()) => self.push_toast("Prompt captured!", ToastKind::Success),
                    Err(e) => {
                        eprintln!("⚠️  Clipboard error: {e}");
                        self.push_toast("Capture failed", ToastKind::Error)
                    }
                }
            }
            Message::Download => {
                if self.is_exporting {
                    return Task::none();
                }
                let Some(entry) = self.lightbox.and_then(|id| self.gallery.get(id)) else {
                    return Task::none();
                };

                let url = entry.url.clone();
                let file_name = format!("art-studio-{}.png", entry.id);

                let mut dialog = FileDialog::new()
                    .set_title("Export Image")
                    .set_file_name(file_name);
                if let Some(downloads) = dirs::download_dir() {
                    dialog = dialog.set_directory(downloads);
                }

                match dialog.save_file() {
                    Some(dest) => {
                        self.is_exporting = true;
                        Task::perform(net::export_image(url.clone(), dest), move |result| {
                            Message::DownloadFinished {
                                url: url.clone(),
                                result,
                            }
                        })
                    }
                    None => Task::none(),
                }
            }
            Message::DownloadFinished { url, result } => {
                self.is_exporting = false;
                match result {
                    Ok(path) => {
                        println!("💾 Exported image to {}", path.display());
                        self.push_toast("Export successful!", ToastKind::Success)
                    }
                    Err(e) => {
                        eprintln!("⚠️  Export failed: {e}");
                        if net::open_in_browser(&url) {
                            self.push_toast("Opening image in your browser...", ToastKind::Info)
                        } else {
                            self.push_toast("Export failed", ToastKind::Error)
                        }
                    }
                }
            }
            Message::ToastFade(id) => {
                if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
                    toast.fading = true;
                }
                Task::perform(tokio::time::sleep(TOAST_FADE), move |_| {
                    Message::ToastExpired(id)
                })
            }
            Message::ToastExpired(id) => {
                self.toasts.retain(|toast| toast.id != id);
                Task::none()
            }
        }
    }

    /// Compile the prompt, record the entry optimistically, persist, and
    /// reset the form. The image is not verified to exist at this point; a
    /// dead URL still produces a gallery entry.
    fn generate(&mut self, prompt: String) -> Task<Message> {
        let style = (self.style != "Auto").then_some(self.style);
        let request = prompt::compile_request(&prompt, style, self.aspect_ratio.as_str());

        println!("🎨 Compiled request URL: {}", request.url);

        let now = Utc::now();
        let entry = GalleryEntry {
            id: now.timestamp_millis() as u64,
            url: request.url,
            prompt,
            enhanced_prompt: request.enhanced_prompt,
            style: self.style.to_string(),
            aspect_ratio: self.aspect_ratio.as_str().to_string(),
            timestamp: now.to_rfc3339(),
        };

        let fetch = Self::fetch_display_task(&entry);
        self.gallery.add(entry);
        self.persist();

        // Fresh form for the next idea
        self.prompt_input.clear();
        self.style = "Auto";
        self.aspect_ratio = AspectRatio::default();
        self.advanced_open = false;

        let toast = self.push_toast("Art ignited! Your image is on its way", ToastKind::Success);
        Task::batch([fetch, toast])
    }

    /// Write the bounded snapshot; failures are logged and swallowed, the
    /// in-memory gallery stays authoritative for the session.
    fn persist(&self) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.save_gallery(&self.gallery.persisted()) {
                eprintln!("⚠️  Failed to persist gallery: {e}");
            }
        }
    }

    /// Fire-and-forget fetch of an entry's image for on-screen display.
    fn fetch_display_task(entry: &GalleryEntry) -> Task<Message> {
        let id = entry.id;
        Task::perform(net::fetch_image_bytes(entry.url.clone()), move |result| {
            Message::ImageFetched(id, result.map(Handle::from_bytes))
        })
    }

    /// Queue a toast and its dismissal timer.
    fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> Task<Message> {
        self.toast_seq += 1;
        let id = self.toast_seq;

        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            fading: false,
        });

        Task::perform(tokio::time::sleep(TOAST_VISIBLE), move |_| {
            Message::ToastFade(id)
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Art Studio").size(34),
            text("Turn your imagination into images")
                .size(14)
                .color(ui::TEXT_DIM),
        ]
        .spacing(4);

        let page = column![
            header,
            ui::form::view(
                &self.prompt_input,
                self.style,
                self.aspect_ratio,
                self.advanced_open,
                self.is_generating,
            ),
            ui::gallery::view(&self.gallery, &self.images, &self.failed_images),
        ]
        .spacing(28)
        .padding(32)
        .max_width(1080.0);

        let base = scrollable(container(page).center_x(Length::Fill)).height(Length::Fill);

        let mut layers = stack![base];

        if let Some(entry) = self.lightbox.and_then(|id| self.gallery.get(id)) {
            layers = layers.push(ui::lightbox::view(
                entry,
                self.images.get(&entry.id),
                self.is_exporting,
            ));
        }

        if !self.toasts.is_empty() {
            layers = layers.push(ui::toast::view(&self.toasts));
        }

        layers.into()
    }

    /// Escape closes the lightbox from anywhere.
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Art Studio", ArtStudio::update, ArtStudio::view)
        .theme(ArtStudio::theme)
        .subscription(ArtStudio::subscription)
        .window_size(iced::Size::new(1280.0, 900.0))
        .centered()
        .run_with(ArtStudio::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A studio with no storage attached, so tests never touch the disk.
    fn test_app() -> ArtStudio {
        ArtStudio {
            gallery: Gallery::new(),
            storage: None,
            images: HashMap::new(),
            failed_images: HashSet::new(),
            prompt_input: String::new(),
            style: "Auto",
            aspect_ratio: AspectRatio::default(),
            advanced_open: false,
            is_generating: false,
            is_exporting: false,
            lightbox: None,
            toasts: Vec::new(),
            toast_seq: 0,
        }
    }

    fn front_id(app: &ArtStudio) -> u64 {
        app.gallery.iter().next().expect("gallery is empty").id
    }

    #[tokio::test]
    async fn test_submit_inserts_trimmed_prompt_at_front() {
        let mut app = test_app();

        app.prompt_input = "  a cat  ".to_string();
        let _ = app.update(Message::SubmitPrompt);

        assert_eq!(app.gallery.count(), 1);
        let entry = app.gallery.iter().next().unwrap();
        assert_eq!(entry.prompt, "a cat");
        assert_eq!(entry.style, "Auto");
        assert_eq!(entry.aspect_ratio, "1:1");
        assert!(entry.url.starts_with(prompt::IMAGE_API_BASE));

        // The form resets and the guard is released
        assert!(app.prompt_input.is_empty());
        assert!(!app.is_generating);

        app.prompt_input = "a dog".to_string();
        let _ = app.update(Message::SubmitPrompt);

        assert_eq!(app.gallery.count(), 2);
        assert_eq!(app.gallery.iter().next().unwrap().prompt, "a dog");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_before_any_state_change() {
        let mut app = test_app();

        app.prompt_input = "   ".to_string();
        let _ = app.update(Message::SubmitPrompt);

        assert_eq!(app.gallery.count(), 0);
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(app.toasts[0].kind, ToastKind::Error);
        assert!(!app.is_generating);
    }

    #[test]
    fn test_reentrant_submit_is_ignored() {
        let mut app = test_app();

        app.prompt_input = "a fox".to_string();
        app.is_generating = true;
        let _ = app.update(Message::SubmitPrompt);

        assert_eq!(app.gallery.count(), 0);
        assert!(app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_selected_style_flows_into_the_entry() {
        let mut app = test_app();

        app.style = "Anime";
        app.prompt_input = "a cat".to_string();
        let _ = app.update(Message::SubmitPrompt);

        let entry = app.gallery.iter().next().unwrap();
        assert_eq!(entry.style, "Anime");
        assert_eq!(
            entry.enhanced_prompt,
            "a cat, Anime style, masterpiece, high quality, highly detailed, \
             8k resolution, cinematic lighting"
        );
        // Style resets with the rest of the form
        assert_eq!(app.style, "Auto");
    }

    #[test]
    fn test_prompt_input_is_clamped() {
        let mut app = test_app();

        let long = "x".repeat(ui::form::PROMPT_MAX_LEN + 50);
        let _ = app.update(Message::PromptChanged(long));

        assert_eq!(app.prompt_input.chars().count(), ui::form::PROMPT_MAX_LEN);
    }

    #[tokio::test]
    async fn test_every_close_path_clears_the_lightbox() {
        let mut app = test_app();

        app.prompt_input = "a castle".to_string();
        let _ = app.update(Message::SubmitPrompt);
        let id = front_id(&app);

        let _ = app.update(Message::OpenLightbox(id));
        assert_eq!(app.lightbox, Some(id));
        let _ = app.update(Message::EscapePressed);
        assert_eq!(app.lightbox, None);

        let _ = app.update(Message::OpenLightbox(id));
        let _ = app.update(Message::CloseLightbox);
        assert_eq!(app.lightbox, None);
    }

    #[test]
    fn test_opening_lightbox_for_unknown_entry_is_a_noop() {
        let mut app = test_app();

        let _ = app.update(Message::OpenLightbox(12345));
        assert_eq!(app.lightbox, None);
    }

    #[tokio::test]
    async fn test_toast_lifecycle() {
        let mut app = test_app();

        let _ = app.push_toast("hello", ToastKind::Info);
        let id = app.toasts[0].id;
        assert!(!app.toasts[0].fading);

        let _ = app.update(Message::ToastFade(id));
        assert!(app.toasts[0].fading);

        let _ = app.update(Message::ToastExpired(id));
        assert!(app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_failed_display_fetch_keeps_the_entry() {
        let mut app = test_app();

        app.prompt_input = "a ghost".to_string();
        let _ = app.update(Message::SubmitPrompt);
        let id = front_id(&app);

        let _ = app.update(Message::ImageFetched(id, Err("boom".to_string())));

        assert_eq!(app.gallery.count(), 1);
        assert!(app.failed_images.contains(&id));
    }
}
