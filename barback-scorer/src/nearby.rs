//! Distance ordering of reviewed places.

use geo::{Coord, Distance, Haversine, Point};

use crate::PlaceReviewSummary;

/// Maximum number of places returned by [`nearest_places`].
pub const NEAREST_PLACES_LIMIT: usize = 20;

/// A place summary with its great-circle distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyPlace {
    /// Review summary of the place.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub summary: PlaceReviewSummary,
    /// Haversine distance from the origin in metres.
    pub distance_metres: f64,
}

/// Order place summaries by distance from `origin` and keep the nearest
/// [`NEAREST_PLACES_LIMIT`].
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Places
/// without a stored location are skipped, and equal distances keep their
/// input order. A non-finite origin yields an empty list.
///
/// # Examples
/// ```
/// use barback_core::PlaceId;
/// use barback_scorer::{PlaceReviewSummary, nearest_places};
/// use geo::Coord;
///
/// let summary = |id, x: f64, y: f64| PlaceReviewSummary {
///     place: PlaceId::new(id),
///     external_id: format!("place-{id}"),
///     location: Some(Coord { x, y }),
///     average_rating: 4.0,
///     review_count: 1,
/// };
/// let origin = Coord { x: 9.19, y: 45.46 };
/// let nearby = nearest_places(origin, vec![summary(1, 2.35, 48.85), summary(2, 9.18, 45.47)]);
/// let order: Vec<_> = nearby.iter().map(|p| p.summary.place.get()).collect();
/// assert_eq!(order, vec![2, 1]);
/// ```
#[must_use]
pub fn nearest_places<I>(origin: Coord<f64>, summaries: I) -> Vec<NearbyPlace>
where
    I: IntoIterator<Item = PlaceReviewSummary>,
{
    if !(origin.x.is_finite() && origin.y.is_finite()) {
        log::debug!("ignoring nearest-place query from non-finite origin {origin:?}");
        return Vec::new();
    }
    let from = Point::from(origin);
    let mut nearby: Vec<NearbyPlace> = summaries
        .into_iter()
        .filter_map(|summary| {
            let location = summary.location?;
            let distance_metres = Haversine.distance(from, Point::from(location));
            distance_metres.is_finite().then_some(NearbyPlace {
                summary,
                distance_metres,
            })
        })
        .collect();
    nearby.sort_by(|left, right| left.distance_metres.total_cmp(&right.distance_metres));
    nearby.truncate(NEAREST_PLACES_LIMIT);
    nearby
}
