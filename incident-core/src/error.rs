use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("incident not found: {0}")]
    IncidentNotFound(String),

    #[error("notification not found: {0}")]
    NotificationNotFound(String),

    #[error("invalid report: {0}")]
    InvalidReport(String),
}

/// Reasons a geolocation query can fail. Every variant degrades to the
/// configured fallback coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    Unavailable,

    #[error("geolocation request timed out")]
    Timeout,

    #[error("geolocation not supported")]
    Unsupported,
}

impl GeoError {
    /// Maps a W3C `GeolocationPositionError.code` to a variant.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::Unavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unsupported,
        }
    }
}
