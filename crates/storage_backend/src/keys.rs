//! Well-known storage keys shared by the chat core and its host.

/// JSON array of history records, most-recent last.
pub const HISTORY: &str = "chat.history";

/// Name of the currently selected model.
pub const SELECTED_MODEL: &str = "chat.selected_model";

/// Opaque auth/session blob; contents are owned by the host application.
pub const AUTH: &str = "chat.auth";
