#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod chat;
pub mod directory;
pub mod event;
pub mod model;
pub mod payments;
pub mod session;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use app::{App, ViewModel};
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::Model;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const PROFILE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const PAYMENT_TIMEOUT: Duration = Duration::from_secs(60);

pub const MAX_MESSAGE_LENGTH: usize = 2000;
pub const MAX_QUERY_LENGTH: usize = 120;

/// Price bounds for a job payment, in minor currency units (cents).
pub const MIN_PRICE_MINOR: u64 = 100;
pub const MAX_PRICE_MINOR: u64 = 1_000_000;

pub const ONBOARDING_FLAG_KEY: &str = "onboarding_complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Transient,
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Timeout,
    RemoteFetch,
    RemoteWrite,
    Validation,
    Auth,
    Serialization,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::RemoteFetch => "REMOTE_FETCH_FAILED",
            Self::RemoteWrite => "REMOTE_WRITE_FAILED",
            Self::Validation => "VALIDATION_ERROR",
            Self::Auth => "AUTH_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::Network | Self::Timeout | Self::RemoteFetch | Self::RemoteWrite => {
                ErrorSeverity::Transient
            }
            Self::Validation | Self::Auth | Self::Serialization | Self::Unknown => {
                ErrorSeverity::Permanent
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub severity: ErrorSeverity,
    pub message: String,
    pub internal_message: Option<String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            internal_message: None,
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            ErrorKind::Timeout => "The request timed out. Please try again.".into(),
            ErrorKind::RemoteFetch => "Unable to load data. Please try again.".into(),
            ErrorKind::RemoteWrite => "Unable to save changes. Please try again.".into(),
            ErrorKind::Validation | ErrorKind::Auth => self.message.clone(),
            ErrorKind::Serialization => {
                "A data error occurred. Please contact support if this persists.".into()
            }
            ErrorKind::Unknown => "An unexpected error occurred. Please try again.".into(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

impl From<CoordinateError> for AppError {
    fn from(e: CoordinateError) -> Self {
        AppError::new(ErrorKind::Validation, e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedCoordinate {
    lat: f64,
    lon: f64,
}

impl ValidatedCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        haversine_distance(self, other)
    }
}

/// Great-circle distance in meters between two validated coordinates.
#[must_use]
pub fn haversine_distance(p1: ValidatedCoordinate, p2: ValidatedCoordinate) -> f64 {
    const EPSILON: f64 = 1e-10;

    if (p1.lat - p2.lat).abs() < EPSILON && (p1.lon - p2.lon).abs() < EPSILON {
        return 0.0;
    }

    let lat1_rad = p1.lat.to_radians();
    let lat2_rad = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().asin();
    let result = EARTH_RADIUS_M * c;

    if result.is_finite() {
        result
    } else {
        f64::MAX
    }
}

#[must_use]
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters < 0.0 {
        return "Unknown".to_string();
    }

    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else if meters < 10_000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} km", meters / 1000.0)
    }
}

#[must_use]
pub fn format_time_ago(timestamp_ms: u64, now_ms: u64) -> String {
    if timestamp_ms > now_ms {
        return "Just now".into();
    }

    let diff_secs = now_ms.saturating_sub(timestamp_ms) / 1000;

    if diff_secs < 5 {
        return "Just now".into();
    }
    if diff_secs < 60 {
        return format!("{diff_secs}s ago");
    }

    let diff_mins = diff_secs / 60;
    if diff_mins < 60 {
        return format!("{diff_mins}m ago");
    }

    let diff_hours = diff_mins / 60;
    if diff_hours < 24 {
        return format!("{diff_hours}h ago");
    }

    let diff_days = diff_hours / 24;
    if diff_days < 7 {
        return format!("{diff_days}d ago");
    }

    format!("{}w ago", diff_days / 7)
}

#[must_use]
pub fn get_current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod coordinate_tests {
        use super::*;

        #[test]
        fn test_valid_coordinates() {
            assert!(ValidatedCoordinate::new(0.0, 0.0).is_ok());
            assert!(ValidatedCoordinate::new(90.0, 180.0).is_ok());
            assert!(ValidatedCoordinate::new(-90.0, -180.0).is_ok());
            assert!(ValidatedCoordinate::new(47.6062, -122.3321).is_ok());
        }

        #[test]
        fn test_invalid_latitude() {
            assert!(matches!(
                ValidatedCoordinate::new(91.0, 0.0),
                Err(CoordinateError::LatitudeOutOfRange(_))
            ));
            assert!(matches!(
                ValidatedCoordinate::new(-91.0, 0.0),
                Err(CoordinateError::LatitudeOutOfRange(_))
            ));
        }

        #[test]
        fn test_invalid_longitude() {
            assert!(matches!(
                ValidatedCoordinate::new(0.0, 181.0),
                Err(CoordinateError::LongitudeOutOfRange(_))
            ));
        }

        #[test]
        fn test_non_finite_coordinates() {
            assert!(matches!(
                ValidatedCoordinate::new(f64::NAN, 0.0),
                Err(CoordinateError::NonFinite)
            ));
            assert!(matches!(
                ValidatedCoordinate::new(0.0, f64::INFINITY),
                Err(CoordinateError::NonFinite)
            ));
        }
    }

    mod distance_tests {
        use super::*;

        #[test]
        fn test_same_point_distance() {
            let p = ValidatedCoordinate::new(47.6062, -122.3321).unwrap();
            assert_eq!(haversine_distance(p, p), 0.0);
        }

        #[test]
        fn test_known_distance() {
            // Seattle -> Portland, roughly 233 km.
            let seattle = ValidatedCoordinate::new(47.6062, -122.3321).unwrap();
            let portland = ValidatedCoordinate::new(45.5152, -122.6784).unwrap();
            let d = haversine_distance(seattle, portland);
            assert!((d - 233_000.0).abs() < 5_000.0, "got {d}");
        }

        #[test]
        fn test_distance_is_symmetric() {
            let a = ValidatedCoordinate::new(10.0, 20.0).unwrap();
            let b = ValidatedCoordinate::new(-30.0, 40.0).unwrap();
            let ab = haversine_distance(a, b);
            let ba = haversine_distance(b, a);
            assert!((ab - ba).abs() < 1e-6);
        }
    }

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_distance() {
            assert_eq!(format_distance(500.0), "500 m");
            assert_eq!(format_distance(1500.0), "1.5 km");
            assert_eq!(format_distance(25_000.0), "25 km");
            assert_eq!(format_distance(f64::NAN), "Unknown");
            assert_eq!(format_distance(-3.0), "Unknown");
        }

        #[test]
        fn test_format_time_ago() {
            assert_eq!(format_time_ago(1000, 2000), "Just now");
            assert_eq!(format_time_ago(0, 30_000), "30s ago");
            assert_eq!(format_time_ago(0, 120_000), "2m ago");
            assert_eq!(format_time_ago(0, 7_200_000), "2h ago");
            assert_eq!(format_time_ago(0, 172_800_000), "2d ago");
        }

        #[test]
        fn test_format_time_ago_future_timestamp() {
            assert_eq!(format_time_ago(5000, 1000), "Just now");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_fetch_failures_are_transient() {
            let e = AppError::new(ErrorKind::RemoteFetch, "profile fetch failed");
            assert_eq!(e.severity, ErrorSeverity::Transient);
            assert_eq!(e.code(), "REMOTE_FETCH_FAILED");
        }

        #[test]
        fn test_validation_message_is_user_facing() {
            let e = AppError::new(ErrorKind::Validation, "Price is out of range");
            assert_eq!(e.user_facing_message(), "Price is out of range");
        }

        #[test]
        fn test_internal_message_in_display_only() {
            let e = AppError::new(ErrorKind::Auth, "Invalid credentials")
                .with_internal("firebase: ERROR_WRONG_PASSWORD");
            assert_eq!(e.user_facing_message(), "Invalid credentials");
            assert!(e.to_string().contains("ERROR_WRONG_PASSWORD"));
        }
    }
}
