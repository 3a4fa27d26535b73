//! Review listings filtered by author, cocktail or place.

use barback_core::{CatalogStore, CocktailId, PlaceId, Review, UserId};

/// Filter over stored reviews. Every criterion left unset matches all
/// reviews, so an empty filter lists the whole store.
///
/// # Examples
/// ```
/// use barback_core::{Catalog, Cocktail, CocktailId, Ingredients, NewReview, Rating, UserId};
/// use barback_scorer::ReviewFilter;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut catalog = Catalog::new();
/// catalog.upsert_cocktail(Cocktail::new("1", "Negroni", Ingredients::default()));
/// for user in ["ada", "bob"] {
///     catalog.add_review(NewReview {
///         user: UserId::new(user),
///         cocktail: CocktailId::new("1"),
///         place_external_id: "ChIJ-bar".into(),
///         location: None,
///         rating: Rating::new(4)?,
///         comment: None,
///     })?;
/// }
///
/// let mine = ReviewFilter::new().by(UserId::new("ada")).run(&catalog);
/// assert_eq!(mine.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    author: Option<UserId>,
    cocktail: Option<CocktailId>,
    place: Option<PlaceId>,
}

impl ReviewFilter {
    /// Match every review.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep reviews written by `user`.
    #[must_use]
    pub fn by(mut self, user: UserId) -> Self {
        self.author = Some(user);
        self
    }

    /// Keep reviews of `cocktail`.
    #[must_use]
    pub fn of(mut self, cocktail: CocktailId) -> Self {
        self.cocktail = Some(cocktail);
        self
    }

    /// Keep reviews left at `place`.
    #[must_use]
    pub const fn at(mut self, place: PlaceId) -> Self {
        self.place = Some(place);
        self
    }

    /// Collect matching reviews ordered by identifier.
    #[must_use]
    pub fn run<S>(&self, store: &S) -> Vec<Review>
    where
        S: CatalogStore + ?Sized,
    {
        store
            .reviews()
            .filter(|review| self.author.as_ref().is_none_or(|user| &review.user == user))
            .filter(|review| {
                self.cocktail
                    .as_ref()
                    .is_none_or(|cocktail| &review.cocktail == cocktail)
            })
            .filter(|review| self.place.is_none_or(|place| review.place == place))
            .collect()
    }
}
