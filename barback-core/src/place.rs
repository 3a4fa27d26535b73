//! Venues where cocktails are reviewed.

use std::fmt;

use geo::Coord;

/// Internal identifier of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PlaceId(u64);

impl PlaceId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A venue known by its external (Google Places) identifier.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// location is optional because places are created from the first review
/// that mentions them, which may not carry coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use barback_core::{Place, PlaceId};
///
/// let place = Place::new(PlaceId::new(1), "ChIJ-bar").with_location(Coord { x: 9.19, y: 45.46 });
/// assert_eq!(place.location, Some(Coord { x: 9.19, y: 45.46 }));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Internal identifier.
    pub id: PlaceId,
    /// External place identifier.
    pub external_id: String,
    /// Stored location, when known.
    pub location: Option<Coord<f64>>,
}

impl Place {
    /// Construct a place without a location.
    #[must_use]
    pub fn new(id: PlaceId, external_id: impl Into<String>) -> Self {
        Self {
            id,
            external_id: external_id.into(),
            location: None,
        }
    }

    /// Attach a location.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }
}
