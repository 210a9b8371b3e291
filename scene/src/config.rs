use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Explosion, Rgb, Rgba, Rocket, PALETTE};

/// Errors concerning an invalid [`SceneConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Tunables for a [`Scene`](crate::Scene). Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Milliseconds between two ticks.
    pub interval_ms: u32,
    /// Rockets launched at the end of every tick.
    pub spawn_per_tick: usize,
    /// Explosions emitted by each dead rocket.
    pub cluster_size: usize,
    /// Colours a cluster may be tinted with, one picked per burst.
    pub palette: Vec<Rgb>,
    /// Translucent fill laid over the previous frame to leave trails.
    pub clear_color: Rgba,
    pub rocket_color: Rgb,
    /// Fixed seed for reproducible shows; random when absent.
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub const DEFAULT_INTERVAL_MS: u32 = 40;
    pub const DEFAULT_CLEAR_ALPHA: f64 = 0.4;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            Err(ConfigError("interval must be at least one millisecond".to_string()))
        } else if self.cluster_size == 0 {
            Err(ConfigError("clusters need at least one explosion".to_string()))
        } else if self.palette.is_empty() {
            Err(ConfigError("palette is empty".to_string()))
        } else if !(0.0..=1.0).contains(&self.clear_color.a) {
            Err(ConfigError(format!(
                "clear alpha {} is outside of [0, 1]",
                self.clear_color.a
            )))
        } else {
            Ok(())
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            spawn_per_tick: 1,
            cluster_size: Explosion::CLUSTER_COUNT,
            palette: PALETTE.to_vec(),
            clear_color: Rgb::BLACK.with_alpha(Self::DEFAULT_CLEAR_ALPHA),
            rocket_color: Rocket::COLOR,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();

        assert_eq!(config.interval_ms, 40);
        assert_eq!(config.spawn_per_tick, 1);
        assert_eq!(config.cluster_size, 16);
        assert_eq!(config.palette.len(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "intervalMs": 16, "palette": [[1, 2, 3]], "seed": 9 }"#)
                .unwrap();

        assert_eq!(config.interval_ms, 16);
        assert_eq!(config.palette, vec![Rgb(1, 2, 3)]);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.cluster_size, 16);
        assert_eq!(config.rocket_color, Rocket::COLOR);
    }

    #[test]
    fn rejects_unusable_values() {
        let empty_palette = SceneConfig {
            palette: Vec::new(),
            ..Default::default()
        };
        let no_interval = SceneConfig {
            interval_ms: 0,
            ..Default::default()
        };
        let no_cluster = SceneConfig {
            cluster_size: 0,
            ..Default::default()
        };
        let opaque_beyond = SceneConfig {
            clear_color: Rgb::BLACK.with_alpha(1.5),
            ..Default::default()
        };

        assert!(empty_palette.validate().is_err());
        assert!(no_interval.validate().is_err());
        assert!(no_cluster.validate().is_err());
        assert!(opaque_beyond.validate().is_err());
    }
}
