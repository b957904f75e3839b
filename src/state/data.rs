/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the storage layer and the UI layer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One generated-image request and its derived display URL.
///
/// Entries are created on submit and never mutated afterwards. They leave
/// the system only by falling outside the persisted retention window or by
/// the storage being cleared externally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    /// Millisecond creation timestamp, doubles as the unique key.
    /// Unique within a session; a clock-skew collision is not handled.
    pub id: u64,
    /// Fully-constructed request URL. The endpoint is stateless, so this is
    /// both the recipe and the image source.
    pub url: String,
    /// Original user text, trimmed.
    pub prompt: String,
    /// Prompt after style/quality augmentation, as sent to the endpoint.
    pub enhanced_prompt: String,
    /// Selected style tag, or "Auto" when none was chosen.
    pub style: String,
    /// Aspect-ratio tag such as "16:9".
    pub aspect_ratio: String,
    /// RFC 3339 creation time, display-only.
    pub timestamp: String,
}

/// How long a toast stays fully visible before it starts fading.
pub const TOAST_VISIBLE: Duration = Duration::from_millis(4000);

/// How long the fade-out lasts before the toast is removed.
pub const TOAST_FADE: Duration = Duration::from_millis(300);

/// Severity of a toast notification, drives its icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient notification. Toasts live in an independent overlay queue:
/// several can be visible at once and each dismisses on its own timer.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Queue-local sequence number, unrelated to gallery ids.
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    /// Set once the visible window elapsed; the toast renders translucent
    /// until its removal timer fires.
    pub fading: bool,
}
