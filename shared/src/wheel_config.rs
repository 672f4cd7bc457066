use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{PRIZE_CLAIMED_KEY, SPINS_USED_KEY, WHEEL_IMAGE_PATH};
use crate::shared_wheel_game::{WheelGeometry, BULB_COUNT, IMAGE_FACE_OFFSET_DEG, SPIN_DURATION_MS};

/// Whether the claimed flag exists at all.
///
/// `ReplayReward` persists the flag, locks on it and shows the reward again
/// after a reload. `CounterOnly` locks on the spin counter alone.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPolicy {
    #[default]
    ReplayReward,
    CounterOnly,
}

impl ClaimPolicy {
    pub fn tracks_claim(&self) -> bool {
        matches!(self, Self::ReplayReward)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Browser local storage
    #[default]
    Local,
    /// Key-value store served by the host page's backend
    Host,
    /// Process memory only, lost on reload
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WheelFace {
    Canvas,
    Image { src: String },
}

impl Default for WheelFace {
    fn default() -> Self {
        Self::Image { src: WHEEL_IMAGE_PATH.to_string() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageKeys {
    pub spins_used: String,
    pub prize_claimed: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            spins_used: SPINS_USED_KEY.to_string(),
            prize_claimed: PRIZE_CLAIMED_KEY.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WheelConfig {
    pub spin_duration_ms: u32,
    pub claim_policy: ClaimPolicy,
    pub storage: StorageBackend,
    pub keys: StorageKeys,
    pub face: WheelFace,
    /// Overrides the face's default angle offset
    pub offset_deg: Option<f64>,
    pub bulb_count: u32,
    pub play_sound: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            claim_policy: ClaimPolicy::default(),
            storage: StorageBackend::default(),
            keys: StorageKeys::default(),
            face: WheelFace::default(),
            offset_deg: None,
            bulb_count: BULB_COUNT,
            play_sound: true,
        }
    }
}

impl WheelConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms as u64)
    }

    pub fn geometry(&self) -> WheelGeometry {
        let offset = self.offset_deg.unwrap_or(match self.face {
            WheelFace::Canvas => 0.0,
            WheelFace::Image { .. } => IMAGE_FACE_OFFSET_DEG,
        });
        WheelGeometry::new(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: WheelConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WheelConfig::default());
        assert_eq!(config.spin_duration(), Duration::from_secs(7));
        assert_eq!(config.keys.spins_used, "wheel_spins_used");
        assert_eq!(config.keys.prize_claimed, "prize_opened");
        assert_eq!(config.geometry().offset_deg, IMAGE_FACE_OFFSET_DEG);
    }

    #[test]
    fn test_partial_override() {
        let config: WheelConfig = serde_json::from_str(
            r#"{
                "spin_duration_ms": 4000,
                "claim_policy": "counter_only",
                "storage": "host",
                "face": { "kind": "canvas" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.spin_duration_ms, 4000);
        assert_eq!(config.claim_policy, ClaimPolicy::CounterOnly);
        assert!(!config.claim_policy.tracks_claim());
        assert_eq!(config.storage, StorageBackend::Host);
        assert_eq!(config.face, WheelFace::Canvas);
        assert_eq!(config.geometry().offset_deg, 0.0);
        assert_eq!(config.bulb_count, BULB_COUNT);
    }

    #[test]
    fn test_explicit_offset_wins() {
        let config = WheelConfig {
            offset_deg: Some(12.5),
            ..WheelConfig::default()
        };
        assert_eq!(config.geometry().offset_deg, 12.5);
    }
}
