use shared::wheel_config::WheelConfig;
use web_sys::window;

/// Element the host page uses to configure the widget
pub const CONFIG_ELEMENT_ID: &str = "wheel-config";

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            // Same origin as the page so the host backend needs no CORS setup
            let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, host);
        }
    }

    "http://127.0.0.1:3000".to_string()
}

pub fn get_asset_url(path: &str) -> String {
    if path.starts_with("http") {
        path.to_string()
    } else {
        format!("{}{}", get_api_base_url(), path)
    }
}

/// Reads the `<script id="wheel-config" type="application/json">` block.
/// A missing or malformed block falls back to the defaults.
pub fn load_wheel_config() -> WheelConfig {
    let raw = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        Some(text) if !text.trim().is_empty() => parse_wheel_config(&text),
        _ => {
            log::debug!("No #{} element, using default wheel config", CONFIG_ELEMENT_ID);
            WheelConfig::default()
        }
    }
}

pub fn parse_wheel_config(text: &str) -> WheelConfig {
    serde_json::from_str(text).unwrap_or_else(|e| {
        log::warn!("Invalid wheel config, using defaults: {}", e);
        WheelConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::wheel_config::{ClaimPolicy, StorageBackend};

    #[test]
    fn test_parse_overrides() {
        let config = parse_wheel_config(r#"{"storage":"memory","claim_policy":"counter_only"}"#);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.claim_policy, ClaimPolicy::CounterOnly);
    }

    #[test]
    fn test_parse_garbage_falls_back() {
        assert_eq!(parse_wheel_config("not json"), WheelConfig::default());
    }
}
