use crate::incident::Coordinates;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const NEW_YORK: Coordinates = Coordinates::new(40.7128, -74.0060);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tick_interval_secs: u64,
    pub notification_cap: usize,
    pub list_limit: usize,
    pub nearby_limit: usize,
    pub mock_incident_count: usize,
    pub fallback_location: Coordinates,
    pub default_confidence: u8,
    pub default_radius_m: u32,
    pub processing_delay_ms: u64,
    pub notification_chance: f64,
    pub seed: Option<u64>,
    pub tile_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            notification_cap: 10,
            list_limit: 10,
            nearby_limit: 5,
            mock_incident_count: 50,
            fallback_location: NEW_YORK,
            default_confidence: 85,
            default_radius_m: 800,
            processing_delay_ms: 2_000,
            notification_chance: 0.3,
            seed: None,
            tile_url: DEFAULT_TILE_URL.into(),
        }
    }
}

impl DashboardConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `INCIDENT_*` overrides read through `lookup`. Unparseable
    /// values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("INCIDENT_TICK_SECS").and_then(|v| v.parse().ok()) {
            self.tick_interval_secs = v;
        }
        if let Some(v) = lookup("INCIDENT_SEED").and_then(|v| v.parse().ok()) {
            self.seed = Some(v);
        }
        if let Some(v) = lookup("INCIDENT_MOCK_COUNT").and_then(|v| v.parse().ok()) {
            self.mock_incident_count = v;
        }
        if let Some(v) = lookup("INCIDENT_NOTIFICATION_CAP").and_then(|v| v.parse().ok()) {
            self.notification_cap = v;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_apply_and_ignore_garbage() {
        let env: HashMap<&str, &str> = [
            ("INCIDENT_TICK_SECS", "3"),
            ("INCIDENT_SEED", "42"),
            ("INCIDENT_MOCK_COUNT", "many"),
        ]
        .into_iter()
        .collect();

        let config =
            DashboardConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.tick_interval(), Duration::from_secs(3));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.mock_incident_count, 50);
        assert_eq!(config.notification_cap, 10);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"notification_cap": 4}"#).expect("parse");
        assert_eq!(config.notification_cap, 4);
        assert_eq!(config.default_confidence, 85);
        assert_eq!(config.fallback_location, NEW_YORK);
    }
}
