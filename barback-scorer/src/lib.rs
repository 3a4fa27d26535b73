//! Ranking utilities for the Barback catalogue.
//!
//! Every ranker is a pure function over a [`CatalogStore`](barback_core::CatalogStore)
//! snapshot:
//! - **Recommendations** score cocktails by how many of their ingredient slots
//!   appear among a user's favourites, falling back to global popularity when
//!   nothing overlaps.
//! - **Place summaries** fold star ratings into per-place averages and
//!   **nearest places** orders them by haversine distance from an origin.
//! - **Review listings** select reviews by author, cocktail or place.
//! - **Browsing** filters the catalogue by free text or favourites and sorts
//!   by name, popularity or review count.
//!
//! # Examples
//!
//! ```
//! use barback_core::{Catalog, Cocktail, Ingredients, UserId};
//! use barback_scorer::{Personalisation, RecommendationScorer, Recommendations};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut catalog = Catalog::new();
//! catalog.upsert_cocktail(Cocktail::new("1", "Negroni", Ingredients::from_names(["Gin", "Campari"])?));
//!
//! let scorer = RecommendationScorer::new();
//! let outcome = scorer.recommend_or_popular(&UserId::new("new-user"), &catalog, Personalisation::Enabled);
//! assert!(matches!(outcome, Recommendations::Popular(ref entries) if entries.len() == 1));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod browse;
mod error;
mod nearby;
mod popularity;
mod recommend;
mod reviews;
mod summary;

pub use browse::{BrowseOrder, CatalogQuery};
pub use error::RecommendationError;
pub use nearby::{NEAREST_PLACES_LIMIT, NearbyPlace, nearest_places};
pub use popularity::rank_by_popularity;
pub use recommend::{Personalisation, RecommendationScorer, Recommendations, ScoredCocktail};
pub use reviews::ReviewFilter;
pub use summary::{
    CocktailReviewSummary, PlaceReviewSummary, summarise_cocktails_at, summarise_places,
};
