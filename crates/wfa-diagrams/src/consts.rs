//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default HTTP timeout for Kroki requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Label of the disclosure control around the process map.
pub(crate) const TOGGLE_LABEL: &str = "Toggle Process Map View";

/// Headline of the inline error panel.
pub(crate) const ERROR_TITLE: &str = "Error: Failed to render process map.";

/// Chevron shown next to the disclosure label.
pub(crate) const CHEVRON_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="process-map-chevron"><polyline points="6 9 12 15 18 9"></polyline></svg>"#;
