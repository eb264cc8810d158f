use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::SetupError;

const CONFIG_ELEMENT_ID: &str = "interaction-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub header_scroll_threshold: f64,
    pub header_offset: f64,
    pub section_lookahead: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub counter_frame_ms: f64,
    pub filter_show_delay_ms: u32,
    pub filter_hide_delay_ms: u32,
    pub tilt_max_degrees: f64,
    pub tilt_reset_ms: u32,
    pub music_volume: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold: 50.0,
            header_offset: 80.0, // sticky header height
            section_lookahead: 200.0,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            counter_frame_ms: 16.0, // ~60fps
            filter_show_delay_ms: 50,
            filter_hide_delay_ms: 300,
            tilt_max_degrees: 10.0,
            tilt_reset_ms: 500,
            music_volume: 0.5,
        }
    }
}

impl InteractionConfig {
    pub fn from_json(raw: &str) -> Result<Self, SetupError> {
        let config = serde_json::from_str(raw)?;
        Ok(config)
    }
}

/// Reads overrides from `<script type="application/json" id="interaction-config">`.
/// Falls back to the defaults when the block is absent or unreadable.
pub fn load(document: &Document) -> InteractionConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());

    match raw {
        Some(raw) => InteractionConfig::from_json(&raw).unwrap_or_else(|e| {
            warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            InteractionConfig::default()
        }),
        None => InteractionConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = InteractionConfig::from_json("{}").unwrap();
        assert_eq!(config, InteractionConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            InteractionConfig::from_json(r#"{"header_offset": 64, "music_volume": 0.2}"#).unwrap();
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.music_volume, 0.2);
        assert_eq!(config.section_lookahead, 200.0);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = InteractionConfig::from_json("{header_offset:").unwrap_err();
        assert!(matches!(err, SetupError::Config(_)));
    }
}
