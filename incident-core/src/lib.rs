//! State, data model and simulation for the emergency incident dashboard.
//!
//! All incident data is synthetic. Confidence scores come from a
//! [`classifier::ClassificationProvider`], never from a trained model.

pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geo;
pub mod incident;
pub mod mock;
pub mod report;
#[cfg(feature = "runtime")]
pub mod ticker;
pub mod view;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, Snapshot, Tab, TickOutcome};
pub use error::{DashboardError, GeoError};
pub use incident::{Category, Confidence, Coordinates, Incident, Notification, Severity, Stats, Status};
pub use report::{ReportComposer, ReportDraft, SubmittedReport};
