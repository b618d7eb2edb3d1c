use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a validated coordinate. Latitude must be in [-90, 90]
    /// and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Construct without range checks, for coordinates known valid such
    /// as the built-in place table.
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Coordinate out of range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidCoordinate {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

/// Built-in places for the dashboard dropdown, each with a fixed
/// coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedPlace {
    Berlin,
    Tokyo,
    London,
    NewYork,
    Sydney,
}

impl NamedPlace {
    pub const ALL: [NamedPlace; 5] = [
        NamedPlace::Berlin,
        NamedPlace::Tokyo,
        NamedPlace::London,
        NamedPlace::NewYork,
        NamedPlace::Sydney,
    ];

    /// Fixed coordinate for the place.
    pub const fn coordinate(self) -> Coordinate {
        match self {
            Self::Berlin => Coordinate::new_unchecked(52.52, 13.41),
            Self::Tokyo => Coordinate::new_unchecked(35.6895, 139.6917),
            Self::London => Coordinate::new_unchecked(51.5074, -0.1278),
            Self::NewYork => Coordinate::new_unchecked(40.7128, -74.0060),
            Self::Sydney => Coordinate::new_unchecked(-33.8688, 151.2093),
        }
    }

    /// Display name for the dropdown.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Berlin => "Berlin",
            Self::Tokyo => "Tokyo",
            Self::London => "London",
            Self::NewYork => "New York",
            Self::Sydney => "Sydney",
        }
    }
}

/// Unrecognized place name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown place: {0}")]
pub struct UnknownPlace(pub String);

impl FromStr for NamedPlace {
    type Err = UnknownPlace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "berlin" => Ok(Self::Berlin),
            "tokyo" => Ok(Self::Tokyo),
            "london" => Ok(Self::London),
            "new york" | "new_york" | "newyork" => Ok(Self::NewYork),
            "sydney" => Ok(Self::Sydney),
            _ => Err(UnknownPlace(s.to_string())),
        }
    }
}

/// The current location choice driving what to fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionKey {
    /// One of the built-in places.
    Place(NamedPlace),
    /// An explicit coordinate, typically from device geolocation.
    Device(Coordinate),
}

impl SelectionKey {
    /// Resolve the selection to a coordinate. Pure: named places carry
    /// fixed coordinates and explicit coordinates pass through unchanged.
    pub fn coordinate(self) -> Coordinate {
        match self {
            Self::Place(place) => place.coordinate(),
            Self::Device(coordinate) => coordinate,
        }
    }
}

/// The three aligned hourly series for one forecast day.
///
/// Index i is hour i of the day. All three series have the same length;
/// a fetch either produces the full triple or fails.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastTriple {
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub rain: Vec<f64>,
}

impl ForecastTriple {
    /// Number of hourly samples per series.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Forecast fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("forecast API returned status {0}")]
    BadStatus(u16),
    #[error("malformed forecast response: {0}")]
    MalformedResponse(String),
    #[error("forecast request timed out")]
    Timeout,
    #[error("network unreachable: {0}")]
    Unreachable(String),
}

impl FetchError {
    /// User-friendly message, should the presentation layer choose to
    /// show one.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadStatus(_) => "Weather service error. Please try again.",
            Self::MalformedResponse(_) => "Received an unexpected response. Please try again.",
            Self::Timeout => "The request timed out. Please try again.",
            Self::Unreachable(_) => "Unable to connect. Check your internet connection.",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::BadStatus(status.as_u16())
        } else {
            Self::Unreachable(error.to_string())
        }
    }
}

/// Location service errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access was denied. Enable it in system settings to use your position."
            }
            Self::ServiceUnavailable => "Location services are unavailable on this device.",
            Self::Timeout => "Finding your position took too long. Please try again.",
            Self::Other(_) => "Could not determine your position. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(52.52, 13.41).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(matches!(
            Coordinate::new(90.01, 0.0),
            Err(InvalidCoordinate::Latitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5),
            Err(InvalidCoordinate::Longitude(_))
        ));
    }

    #[test]
    fn test_place_coordinates_are_exact() {
        let berlin = NamedPlace::Berlin.coordinate();
        assert_eq!(berlin.latitude, 52.52);
        assert_eq!(berlin.longitude, 13.41);

        let tokyo = NamedPlace::Tokyo.coordinate();
        assert_eq!(tokyo.latitude, 35.6895);
        assert_eq!(tokyo.longitude, 139.6917);

        let london = NamedPlace::London.coordinate();
        assert_eq!(london.latitude, 51.5074);
        assert_eq!(london.longitude, -0.1278);

        let new_york = NamedPlace::NewYork.coordinate();
        assert_eq!(new_york.latitude, 40.7128);
        assert_eq!(new_york.longitude, -74.0060);

        let sydney = NamedPlace::Sydney.coordinate();
        assert_eq!(sydney.latitude, -33.8688);
        assert_eq!(sydney.longitude, 151.2093);
    }

    #[test]
    fn test_all_places_have_valid_coordinates() {
        for place in NamedPlace::ALL {
            let c = place.coordinate();
            assert!(Coordinate::new(c.latitude, c.longitude).is_ok(), "{:?}", place);
        }
    }

    #[test]
    fn test_place_from_str() {
        assert_eq!("berlin".parse::<NamedPlace>().unwrap(), NamedPlace::Berlin);
        assert_eq!("Tokyo".parse::<NamedPlace>().unwrap(), NamedPlace::Tokyo);
        assert_eq!(
            "new york".parse::<NamedPlace>().unwrap(),
            NamedPlace::NewYork
        );
        assert_eq!(
            " sydney ".parse::<NamedPlace>().unwrap(),
            NamedPlace::Sydney
        );
        assert!("atlantis".parse::<NamedPlace>().is_err());
    }

    #[test]
    fn test_selection_resolves_place() {
        let key = SelectionKey::Place(NamedPlace::Tokyo);
        assert_eq!(key.coordinate(), NamedPlace::Tokyo.coordinate());
    }

    #[test]
    fn test_selection_passes_device_coordinate_through() {
        let coordinate = Coordinate::new(48.8566, 2.3522).unwrap();
        let key = SelectionKey::Device(coordinate);
        assert_eq!(key.coordinate(), coordinate);
    }

    #[test]
    fn test_triple_default_is_empty() {
        let triple = ForecastTriple::default();
        assert!(triple.is_empty());
        assert_eq!(triple.len(), 0);
    }

    #[test]
    fn test_fetch_error_user_messages() {
        assert!(FetchError::BadStatus(502).user_message().contains("service"));
        assert!(FetchError::Timeout.user_message().contains("timed out"));
    }

    #[test]
    fn test_location_error_user_messages() {
        assert!(LocationError::PermissionDenied
            .user_message()
            .contains("denied"));
        assert!(LocationError::ServiceUnavailable
            .user_message()
            .contains("unavailable"));
    }
}
