//! Review summaries folded from individual ratings.
//!
//! Summaries are recomputed from the store's reviews on every call so edits
//! and deletions are reflected without any incremental bookkeeping.

use std::collections::BTreeMap;

use barback_core::{CatalogStore, CocktailId, PlaceId};
use geo::Coord;

/// Average rating of one cocktail at one place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceReviewSummary {
    /// Internal place identifier.
    pub place: PlaceId,
    /// External place identifier.
    pub external_id: String,
    /// Stored place location, when known.
    pub location: Option<Coord<f64>>,
    /// Mean star rating.
    pub average_rating: f64,
    /// Number of reviews folded into the mean.
    pub review_count: u32,
}

/// Average rating of one cocktail across the reviews left at a place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CocktailReviewSummary {
    /// Reviewed cocktail.
    pub cocktail: CocktailId,
    /// Display name of the cocktail.
    pub name: String,
    /// Mean star rating.
    pub average_rating: f64,
    /// Number of reviews folded into the mean.
    pub review_count: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    total: u32,
    count: u32,
}

impl Tally {
    fn add(&mut self, rating: u8) {
        self.total = self.total.saturating_add(u32::from(rating));
        self.count = self.count.saturating_add(1);
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "average ratings are reported as fractional stars"
    )]
    fn mean(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        f64::from(self.total) / f64::from(self.count)
    }
}

/// Summarise the reviews of `cocktail`, one entry per place, ordered by
/// place identifier.
///
/// Reviews pointing at places the store does not know are ignored.
///
/// # Examples
/// ```
/// use barback_core::{Catalog, CocktailId, Cocktail, Ingredients, NewReview, Rating, UserId};
/// use barback_scorer::summarise_places;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("1", "Negroni", Ingredients::default()));
/// for (user, stars) in [("ada", 5), ("bob", 4)] {
///     catalog.add_review(NewReview {
///         user: UserId::new(user),
///         cocktail: CocktailId::new("1"),
///         place_external_id: "ChIJ-bar".into(),
///         location: None,
///         rating: Rating::new(stars)?,
///         comment: None,
///     })?;
/// }
///
/// let summaries = summarise_places(&catalog, &CocktailId::new("1"));
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries.first().map(|s| s.review_count), Some(2));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn summarise_places<S>(store: &S, cocktail: &CocktailId) -> Vec<PlaceReviewSummary>
where
    S: CatalogStore + ?Sized,
{
    let mut tallies: BTreeMap<PlaceId, Tally> = BTreeMap::new();
    for review in store.reviews().filter(|review| &review.cocktail == cocktail) {
        tallies
            .entry(review.place)
            .or_default()
            .add(review.rating.get());
    }
    tallies
        .into_iter()
        .filter_map(|(id, tally)| {
            let place = store.place(id)?;
            Some(PlaceReviewSummary {
                place: id,
                external_id: place.external_id,
                location: place.location,
                average_rating: tally.mean(),
                review_count: tally.count,
            })
        })
        .collect()
}

/// Summarise the cocktails reviewed at `place`, ordered by cocktail
/// identifier.
#[must_use]
pub fn summarise_cocktails_at<S>(store: &S, place: PlaceId) -> Vec<CocktailReviewSummary>
where
    S: CatalogStore + ?Sized,
{
    let mut tallies: BTreeMap<CocktailId, Tally> = BTreeMap::new();
    for review in store.reviews().filter(|review| review.place == place) {
        tallies
            .entry(review.cocktail)
            .or_default()
            .add(review.rating.get());
    }
    tallies
        .into_iter()
        .filter_map(|(id, tally)| {
            let cocktail = store.cocktail(&id)?;
            Some(CocktailReviewSummary {
                cocktail: id,
                name: cocktail.name,
                average_rating: tally.mean(),
                review_count: tally.count,
            })
        })
        .collect()
}
