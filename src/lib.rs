//! Facade crate for the Barback cocktail engine.
//!
//! This crate re-exports the core domain types and the rankers, and exposes
//! the SQLite-backed catalogue store behind the `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use barback_core::{
    Catalog, CatalogEntry, CatalogError, CatalogStore, Cocktail, CocktailId, FavouriteEdge,
    FavouriteSet, Ingredients, IngredientsError, MAX_INGREDIENT_SLOTS, NewReview, Place, PlaceId,
    Rating, RatingError, Review, ReviewId, UserId,
};

pub use barback_scorer::{
    BrowseOrder, CatalogQuery, CocktailReviewSummary, NEAREST_PLACES_LIMIT, NearbyPlace,
    Personalisation, PlaceReviewSummary, RecommendationError, RecommendationScorer,
    Recommendations, ReviewFilter, ScoredCocktail, nearest_places, rank_by_popularity,
    summarise_cocktails_at, summarise_places,
};

#[cfg(feature = "store-sqlite")]
pub use barback_core::{CATALOG_SCHEMA, SqliteCatalogStore, SqliteCatalogStoreError};
