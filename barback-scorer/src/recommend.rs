//! Ingredient-overlap recommendations.
//!
//! A user's favourites define a set of liked ingredients. Every catalogue
//! entry is scored by how many of its non-empty ingredient slots fall in that
//! set, entries without any overlap are dropped, and the rest are ranked by
//! overlap then popularity. Ties beyond those keys keep catalogue order.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use barback_core::{CatalogEntry, CatalogStore, Cocktail, UserId};

use crate::{RecommendationError, rank_by_popularity};

/// A catalogue entry annotated with its ingredient overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCocktail {
    /// Cocktail and derived counters.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub entry: CatalogEntry,
    /// Slots whose ingredient appears among the user's favourites.
    pub match_count: u32,
}

/// Whether personalised ranking should be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Personalisation {
    /// Rank by ingredient overlap, falling back to popularity when empty.
    #[default]
    Enabled,
    /// Always rank by popularity.
    Disabled,
}

/// Outcome of [`RecommendationScorer::recommend_or_popular`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "cocktails", rename_all = "snake_case")
)]
pub enum Recommendations {
    /// Overlap-ranked cocktails, at most the scorer's limit.
    Personalised(Vec<ScoredCocktail>),
    /// Every catalogue entry ranked by popularity.
    Popular(Vec<CatalogEntry>),
}

impl Recommendations {
    /// Report whether the list was personalised.
    #[must_use]
    pub const fn is_personalised(&self) -> bool {
        matches!(self, Self::Personalised(_))
    }

    /// Number of cocktails in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Personalised(items) => items.len(),
            Self::Popular(items) => items.len(),
        }
    }

    /// Report whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ranks catalogue entries by ingredient overlap with a user's favourites.
///
/// # Examples
/// ```
/// use barback_core::{Catalog, Cocktail, FavouriteEdge, Ingredients, UserId};
/// use barback_scorer::RecommendationScorer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("a", "Gimlet", Ingredients::from_names(["Gin", "Lime"])?));
/// catalog.upsert_cocktail(Cocktail::new("b", "Gin and Tonic", Ingredients::from_names(["Gin", "Tonic"])?));
/// catalog.upsert_cocktail(Cocktail::new("c", "Screwdriver", Ingredients::from_names(["Vodka"])?));
/// catalog.add_favourite(FavouriteEdge::new("ada", "a"))?;
///
/// let scorer = RecommendationScorer::new();
/// let ranked = scorer.recommend(&UserId::new("ada"), &catalog);
/// let ids: Vec<_> = ranked.iter().map(|s| (s.entry.cocktail.id.as_str(), s.match_count)).collect();
/// assert_eq!(ids, vec![("a", 2), ("b", 1)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationScorer {
    limit: NonZeroUsize,
}

impl RecommendationScorer {
    /// Number of recommendations returned unless configured otherwise.
    pub const DEFAULT_LIMIT: usize = 12;

    /// Construct a scorer returning [`Self::DEFAULT_LIMIT`] results.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: NonZeroUsize::MIN.saturating_add(Self::DEFAULT_LIMIT - 1),
        }
    }

    /// Construct a scorer returning at most `limit` results.
    ///
    /// # Errors
    /// Returns [`RecommendationError::ZeroLimit`] when `limit` is zero.
    pub const fn with_limit(limit: usize) -> Result<Self, RecommendationError> {
        match NonZeroUsize::new(limit) {
            Some(value) => Ok(Self { limit: value }),
            None => Err(RecommendationError::ZeroLimit),
        }
    }

    /// Configured result limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Rank the store's entries against `user`'s favourites.
    ///
    /// Users without favourites, or whose favourites share no ingredient with
    /// the catalogue, receive an empty list.
    #[must_use]
    pub fn recommend<S>(&self, user: &UserId, store: &S) -> Vec<ScoredCocktail>
    where
        S: CatalogStore + ?Sized,
    {
        let favourites: Vec<Cocktail> = store.favourites_of(user).collect();
        let ranked = self.score(&favourites, store.entries());
        log::debug!(
            "ranked {} recommendations for {user} from {} favourites",
            ranked.len(),
            favourites.len()
        );
        ranked
    }

    /// Rank `entries` against an explicit list of favourite cocktails.
    #[must_use]
    pub fn score<I>(&self, favourites: &[Cocktail], entries: I) -> Vec<ScoredCocktail>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let liked: HashSet<&str> = favourites
            .iter()
            .flat_map(|cocktail| cocktail.ingredients.present())
            .collect();
        if liked.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredCocktail> = entries
            .into_iter()
            .filter_map(|entry| {
                let match_count = overlap(&entry.cocktail, &liked);
                (match_count > 0).then_some(ScoredCocktail { entry, match_count })
            })
            .collect();
        scored.sort_by(|left, right| {
            right
                .match_count
                .cmp(&left.match_count)
                .then_with(|| right.entry.popularity.cmp(&left.entry.popularity))
        });
        scored.truncate(self.limit());
        scored
    }

    /// Personalised recommendations with a popularity fallback.
    ///
    /// The popular list is returned when personalisation is disabled or the
    /// personalised list is empty.
    #[must_use]
    pub fn recommend_or_popular<S>(
        &self,
        user: &UserId,
        store: &S,
        personalisation: Personalisation,
    ) -> Recommendations
    where
        S: CatalogStore + ?Sized,
    {
        if personalisation == Personalisation::Enabled {
            let personalised = self.recommend(user, store);
            if !personalised.is_empty() {
                return Recommendations::Personalised(personalised);
            }
            log::debug!("no personalised matches for {user}; falling back to popularity");
        }
        Recommendations::Popular(rank_by_popularity(store.entries()))
    }
}

impl Default for RecommendationScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn overlap(cocktail: &Cocktail, liked: &HashSet<&str>) -> u32 {
    let count = cocktail
        .ingredients
        .present()
        .filter(|ingredient| liked.contains(ingredient))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
