//! In-memory catalogue snapshot.
//!
//! [`Catalog`] owns the authoritative collections: cocktails, favourite edges,
//! places and reviews. Derived counters are never stored; [`Catalog::entries`]
//! recomputes popularity and review counts from the edges every time it is
//! read so removals cannot leave stale totals behind.

use std::collections::{BTreeMap, HashMap};

use geo::Coord;
use thiserror::Error;

use crate::{
    Cocktail, CocktailId, FavouriteEdge, FavouriteSet, Place, PlaceId, Rating, Review, ReviewId,
    UserId,
};

/// A cocktail together with counters derived from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    /// The catalogue record.
    pub cocktail: Cocktail,
    /// Distinct users who bookmarked the cocktail.
    pub popularity: u32,
    /// Reviews referencing the cocktail.
    pub review_count: u32,
}

/// Errors raised by [`Catalog`] mutators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The referenced cocktail is not in the catalogue.
    #[error("cocktail {id} is not in the catalogue")]
    UnknownCocktail {
        /// Missing cocktail identifier.
        id: CocktailId,
    },
    /// The referenced place is not in the catalogue.
    #[error("place {id} is not in the catalogue")]
    UnknownPlace {
        /// Missing place identifier.
        id: PlaceId,
    },
    /// The referenced review does not exist.
    #[error("review {id} does not exist")]
    UnknownReview {
        /// Missing review identifier.
        id: ReviewId,
    },
    /// A user attempted to change somebody else's review.
    #[error("review {id} was not written by {user}")]
    NotReviewAuthor {
        /// Review identifier.
        id: ReviewId,
        /// User attempting the change.
        user: UserId,
    },
    /// Another place already uses the external identifier.
    #[error("external place id {external_id} is already bound to place {existing}")]
    DuplicateExternalPlace {
        /// Conflicting external identifier.
        external_id: String,
        /// Place already bound to it.
        existing: PlaceId,
    },
}

/// Review submitted by a user about a cocktail served at a place.
///
/// The place is identified by its external id; [`Catalog::add_review`] creates
/// it on first use.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// Author.
    pub user: UserId,
    /// Reviewed cocktail.
    pub cocktail: CocktailId,
    /// External place identifier.
    pub place_external_id: String,
    /// Place location reported with the review.
    pub location: Option<Coord<f64>>,
    /// Star rating.
    pub rating: Rating,
    /// Optional free-form comment.
    pub comment: Option<String>,
}

/// Immutable-by-default snapshot of the catalogue.
///
/// Cocktails keep their insertion order, which is the catalogue order used to
/// break ranking ties.
///
/// # Examples
/// ```
/// use barback_core::{Catalog, Cocktail, FavouriteEdge, Ingredients};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("1", "Gimlet", Ingredients::from_names(["Gin", "Lime"])?));
/// catalog.add_favourite(FavouriteEdge::new("ada", "1"))?;
/// catalog.add_favourite(FavouriteEdge::new("bob", "1"))?;
///
/// let entries = catalog.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries.first().map(|entry| entry.popularity), Some(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cocktails: Vec<Cocktail>,
    positions: HashMap<CocktailId, usize>,
    favourites: FavouriteSet,
    places: BTreeMap<PlaceId, Place>,
    reviews: BTreeMap<ReviewId, Review>,
}

impl Catalog {
    /// Construct an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cocktail or replace the record sharing its identifier.
    ///
    /// Replacement keeps the original catalogue position.
    pub fn upsert_cocktail(&mut self, cocktail: Cocktail) {
        if let Some(slot) = self
            .positions
            .get(&cocktail.id)
            .and_then(|&index| self.cocktails.get_mut(index))
        {
            *slot = cocktail;
            return;
        }
        self.positions
            .insert(cocktail.id.clone(), self.cocktails.len());
        self.cocktails.push(cocktail);
    }

    /// Look up a cocktail.
    #[must_use]
    pub fn cocktail(&self, id: &CocktailId) -> Option<&Cocktail> {
        self.positions
            .get(id)
            .and_then(|&index| self.cocktails.get(index))
    }

    /// Iterate cocktails in catalogue order.
    pub fn cocktails(&self) -> impl Iterator<Item = &Cocktail> + '_ {
        self.cocktails.iter()
    }

    /// Number of cocktails.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cocktails.len()
    }

    /// Report whether the catalogue holds no cocktails.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cocktails.is_empty()
    }

    /// Borrow the favourite edges.
    #[must_use]
    pub const fn favourites(&self) -> &FavouriteSet {
        &self.favourites
    }

    /// Bookmark a cocktail, returning `false` when the edge already existed.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownCocktail`] when the cocktail is absent.
    pub fn add_favourite(&mut self, edge: FavouriteEdge) -> Result<bool, CatalogError> {
        self.require_cocktail(&edge.cocktail)?;
        Ok(self.favourites.insert(edge))
    }

    /// Remove a bookmark, returning `false` when it did not exist.
    pub fn remove_favourite(&mut self, edge: &FavouriteEdge) -> bool {
        self.favourites.remove(edge)
    }

    /// Iterate places ordered by identifier.
    pub fn places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.places.values()
    }

    /// Look up a place.
    #[must_use]
    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    /// Look up a place by its external identifier.
    #[must_use]
    pub fn place_by_external(&self, external_id: &str) -> Option<&Place> {
        self.places
            .values()
            .find(|place| place.external_id == external_id)
    }

    /// Insert a place with a caller-chosen identifier.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateExternalPlace`] when a different place
    /// already uses the external identifier.
    pub fn insert_place(&mut self, place: Place) -> Result<(), CatalogError> {
        if let Some(existing) = self
            .place_by_external(&place.external_id)
            .filter(|existing| existing.id != place.id)
        {
            return Err(CatalogError::DuplicateExternalPlace {
                external_id: place.external_id,
                existing: existing.id,
            });
        }
        self.places.insert(place.id, place);
        Ok(())
    }

    /// Return the place bound to `external_id`, creating it when missing.
    ///
    /// A finite location is recorded when the place has none yet; a stored
    /// location is never overwritten.
    pub fn find_or_create_place(
        &mut self,
        external_id: &str,
        location: Option<Coord<f64>>,
    ) -> PlaceId {
        let existing = self.place_by_external(external_id).map(|place| place.id);
        let id = existing.unwrap_or_else(|| self.next_place_id());
        let place = self
            .places
            .entry(id)
            .or_insert_with(|| Place::new(id, external_id));
        if place.location.is_none() {
            place.location = location.filter(|coord| coord.x.is_finite() && coord.y.is_finite());
        }
        id
    }

    /// Insert a fully formed review, replacing one with the same identifier.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownCocktail`] or
    /// [`CatalogError::UnknownPlace`] when the review references missing
    /// records.
    pub fn insert_review(&mut self, review: Review) -> Result<(), CatalogError> {
        self.require_cocktail(&review.cocktail)?;
        if !self.places.contains_key(&review.place) {
            return Err(CatalogError::UnknownPlace { id: review.place });
        }
        self.reviews.insert(review.id, review);
        Ok(())
    }

    /// Record a new review, creating its place when first mentioned.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownCocktail`] when the cocktail is absent.
    pub fn add_review(&mut self, review: NewReview) -> Result<ReviewId, CatalogError> {
        self.require_cocktail(&review.cocktail)?;
        let place = self.find_or_create_place(&review.place_external_id, review.location);
        let id = self.next_review_id();
        self.reviews.insert(
            id,
            Review {
                id,
                user: review.user,
                cocktail: review.cocktail,
                place,
                rating: review.rating,
                comment: review.comment,
            },
        );
        Ok(id)
    }

    /// Change the rating and/or comment of a review written by `user`.
    ///
    /// A blank comment leaves the stored comment unchanged.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownReview`] or
    /// [`CatalogError::NotReviewAuthor`].
    pub fn update_review(
        &mut self,
        id: ReviewId,
        user: &UserId,
        rating: Option<Rating>,
        comment: Option<String>,
    ) -> Result<(), CatalogError> {
        let review = self.authored_review_mut(id, user)?;
        if let Some(value) = rating {
            review.rating = value;
        }
        if let Some(text) = comment.filter(|text| !text.trim().is_empty()) {
            review.comment = Some(text);
        }
        Ok(())
    }

    /// Delete a review written by `user`.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownReview`] or
    /// [`CatalogError::NotReviewAuthor`].
    pub fn remove_review(&mut self, id: ReviewId, user: &UserId) -> Result<Review, CatalogError> {
        self.authored_review_mut(id, user)?;
        self.reviews
            .remove(&id)
            .ok_or(CatalogError::UnknownReview { id })
    }

    /// Iterate all reviews ordered by identifier.
    pub fn reviews(&self) -> impl Iterator<Item = &Review> + '_ {
        self.reviews.values()
    }

    /// Iterate the reviews of one cocktail.
    pub fn reviews_for<'a>(&'a self, cocktail: &'a CocktailId) -> impl Iterator<Item = &'a Review> {
        self.reviews
            .values()
            .filter(move |review| &review.cocktail == cocktail)
    }

    /// Build catalogue entries in catalogue order with freshly derived
    /// counters.
    #[must_use]
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let popularity = self.favourites.popularity_counts();
        let mut review_counts: HashMap<&CocktailId, u32> = HashMap::new();
        for review in self.reviews.values() {
            let count = review_counts.entry(&review.cocktail).or_default();
            *count = count.saturating_add(1);
        }
        self.cocktails
            .iter()
            .map(|cocktail| CatalogEntry {
                popularity: popularity.get(&cocktail.id).copied().unwrap_or_default(),
                review_count: review_counts
                    .get(&cocktail.id)
                    .copied()
                    .unwrap_or_default(),
                cocktail: cocktail.clone(),
            })
            .collect()
    }

    fn require_cocktail(&self, id: &CocktailId) -> Result<(), CatalogError> {
        if self.positions.contains_key(id) {
            Ok(())
        } else {
            Err(CatalogError::UnknownCocktail { id: id.clone() })
        }
    }

    fn authored_review_mut(
        &mut self,
        id: ReviewId,
        user: &UserId,
    ) -> Result<&mut Review, CatalogError> {
        let review = self
            .reviews
            .get_mut(&id)
            .ok_or(CatalogError::UnknownReview { id })?;
        if &review.user != user {
            return Err(CatalogError::NotReviewAuthor {
                id,
                user: user.clone(),
            });
        }
        Ok(review)
    }

    fn next_place_id(&self) -> PlaceId {
        let last = self.places.keys().next_back().map_or(0, |id| id.get());
        PlaceId::new(last.saturating_add(1))
    }

    fn next_review_id(&self) -> ReviewId {
        let last = self.reviews.keys().next_back().map_or(0, |id| id.get());
        ReviewId::new(last.saturating_add(1))
    }
}
