use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Flooding,
    PowerOutage,
    AirQuality,
    Violence,
    Fire,
    Medical,
    Traffic,
    Weather,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Flooding => "Waterlogging/Flooding",
            Category::PowerOutage => "Power Outage",
            Category::AirQuality => "Air Quality Issue",
            Category::Violence => "Safety/Security",
            Category::Fire => "Fire Emergency",
            Category::Medical => "Medical Emergency",
            Category::Traffic => "Traffic Issue",
            Category::Weather => "Weather Emergency",
        }
    }

    /// Short name used by the map legend.
    pub fn legend_label(self) -> &'static str {
        match self {
            Category::Flooding => "Flooding",
            Category::PowerOutage => "Power",
            Category::AirQuality => "Air Quality",
            Category::Violence => "Safety",
            Category::Fire => "Fire",
            Category::Medical => "Medical",
            Category::Traffic => "Traffic",
            Category::Weather => "Weather",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Category::Flooding => "\u{1F4A7}",
            Category::PowerOutage => "\u{26A1}",
            Category::AirQuality => "\u{1F32C}\u{FE0F}",
            Category::Violence => "\u{1F6A8}",
            Category::Fire => "\u{1F525}",
            Category::Medical => "\u{1F3E5}",
            Category::Traffic => "\u{1F697}",
            Category::Weather => "\u{26C8}\u{FE0F}",
        }
    }
}

/// Ordered urgency level; `Low < Medium < High < Critical`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#22C55E",
            Severity::Medium => "#F59E0B",
            Severity::High => "#EF4444",
            Severity::Critical => "#DC2626",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    Active,
    Investigating,
    Resolved,
}

/// Automated-classification score, never above 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn raise(self, by: u8) -> Self {
        Self::new(self.0.saturating_add(by))
    }
}

impl From<u8> for Confidence {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub location: Coordinates,
    pub affected_radius_m: u32,
    pub severity: Severity,
    pub status: Status,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub confidence: Confidence,
    pub upvotes: u32,
    pub downvotes: u32,
    pub verified_by_authority: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_active: u32,
    pub total_resolved: u32,
    pub critical_alerts: u32,
    pub average_response_minutes: f64,
    pub ai_accuracy_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub incident_id: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn confidence_clamps_on_construction_and_raise() {
        assert_eq!(Confidence::new(140).value(), 100);
        assert_eq!(Confidence::new(97).raise(4).value(), 100);
        assert_eq!(Confidence::new(255).raise(255).value(), 100);
        assert_eq!(Confidence::new(70).raise(3).value(), 73);
    }

    #[test]
    fn confidence_deserializes_through_clamp() {
        let parsed: Confidence = serde_json::from_str("180").expect("parse");
        assert_eq!(parsed.value(), 100);
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn enums_round_trip_through_strings() {
        assert_eq!(Category::PowerOutage.to_string(), "power_outage");
        assert_eq!(Category::from_str("air_quality"), Ok(Category::AirQuality));
        assert_eq!(Severity::from_str("critical"), Ok(Severity::Critical));
        assert!(Status::from_str("closed").is_err());
        assert_eq!(
            serde_json::to_value(Status::Investigating).expect("json"),
            serde_json::json!("investigating")
        );
    }

    #[test]
    fn coordinates_validate_range() {
        assert!(Coordinates::new(40.0, -74.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }
}
