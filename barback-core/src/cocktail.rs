//! Cocktails and their bounded list of ingredient slots.

use std::fmt;

use thiserror::Error;

/// Maximum number of ingredient slots a cocktail may carry.
pub const MAX_INGREDIENT_SLOTS: usize = 15;

/// Identifier of a cocktail, usually TheCocktailDB `idDrink`.
///
/// # Examples
/// ```
/// use barback_core::CocktailId;
///
/// let id = CocktailId::new("11007");
/// assert_eq!(id.as_str(), "11007");
/// assert_eq!(id.to_string(), "11007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CocktailId(String);

impl CocktailId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CocktailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CocktailId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CocktailId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors returned when building [`Ingredients`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngredientsError {
    /// More slots were supplied than a cocktail can hold.
    #[error("cocktail has {found} ingredient slots; at most {MAX_INGREDIENT_SLOTS} are supported")]
    TooManySlots {
        /// Number of slots supplied.
        found: usize,
    },
}

/// Ordered ingredient slots of a cocktail.
///
/// Slots may be empty. Empty strings and absent slots never take part in
/// matching; see [`Ingredients::present`].
///
/// # Examples
/// ```
/// use barback_core::Ingredients;
///
/// # fn main() -> Result<(), barback_core::IngredientsError> {
/// let ingredients = Ingredients::from_slots([Some("Gin"), None, Some(""), Some("Lime")])?;
/// assert_eq!(ingredients.slots().len(), 4);
/// assert_eq!(ingredients.present().collect::<Vec<_>>(), vec!["Gin", "Lime"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Option<String>>", into = "Vec<Option<String>>")
)]
pub struct Ingredients {
    slots: Vec<Option<String>>,
}

impl Ingredients {
    /// Build ingredients from optional slots, preserving their order.
    ///
    /// # Errors
    /// Returns [`IngredientsError::TooManySlots`] when more than
    /// [`MAX_INGREDIENT_SLOTS`] slots are supplied.
    pub fn from_slots<I, S>(slots: I) -> Result<Self, IngredientsError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let collected: Vec<Option<String>> = slots
            .into_iter()
            .map(|slot| slot.map(Into::into))
            .collect();
        if collected.len() > MAX_INGREDIENT_SLOTS {
            return Err(IngredientsError::TooManySlots {
                found: collected.len(),
            });
        }
        Ok(Self { slots: collected })
    }

    /// Build ingredients where every slot is filled.
    ///
    /// # Errors
    /// Returns [`IngredientsError::TooManySlots`] when more than
    /// [`MAX_INGREDIENT_SLOTS`] names are supplied.
    ///
    /// # Examples
    /// ```
    /// use barback_core::Ingredients;
    ///
    /// let ingredients = Ingredients::from_names(["Vodka", "Tonic"]).unwrap();
    /// assert_eq!(ingredients.present().count(), 2);
    /// ```
    pub fn from_names<I, S>(names: I) -> Result<Self, IngredientsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_slots(names.into_iter().map(Some))
    }

    /// Borrow the raw slots, including empty ones.
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Iterate the non-empty slot values in slot order.
    ///
    /// A value repeated across slots is yielded once per slot.
    pub fn present(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots
            .iter()
            .filter_map(Option::as_deref)
            .filter(|value| !value.is_empty())
    }
}

impl TryFrom<Vec<Option<String>>> for Ingredients {
    type Error = IngredientsError;

    fn try_from(slots: Vec<Option<String>>) -> Result<Self, Self::Error> {
        Self::from_slots(slots)
    }
}

impl From<Ingredients> for Vec<Option<String>> {
    fn from(ingredients: Ingredients) -> Self {
        ingredients.slots
    }
}

/// A cocktail record from the catalogue.
///
/// # Examples
/// ```
/// use barback_core::{Cocktail, Ingredients};
///
/// let margarita = Cocktail::new(
///     "11007",
///     "Margarita",
///     Ingredients::from_names(["Tequila", "Triple sec", "Lime juice", "Salt"]).unwrap(),
/// )
/// .with_glass("Cocktail glass");
///
/// assert_eq!(margarita.id.as_str(), "11007");
/// assert_eq!(margarita.glass.as_deref(), Some("Cocktail glass"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cocktail {
    /// Unique identifier.
    pub id: CocktailId,
    /// Display name.
    pub name: String,
    /// Thumbnail image reference.
    pub thumbnail: Option<String>,
    /// Catalogue category, e.g. "Ordinary Drink".
    pub category: Option<String>,
    /// Alcoholic marker text, e.g. "Alcoholic".
    pub alcoholic: Option<String>,
    /// Serving glass.
    pub glass: Option<String>,
    /// Preparation instructions.
    pub instructions: Option<String>,
    /// Ingredient slots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Ingredients,
}

impl Cocktail {
    /// Construct a cocktail with no optional details.
    #[must_use]
    pub fn new(
        id: impl Into<CocktailId>,
        name: impl Into<String>,
        ingredients: Ingredients,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: None,
            category: None,
            alcoholic: None,
            glass: None,
            instructions: None,
            ingredients,
        }
    }

    /// Set the thumbnail reference.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Set the catalogue category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the alcoholic marker.
    #[must_use]
    pub fn with_alcoholic(mut self, alcoholic: impl Into<String>) -> Self {
        self.alcoholic = Some(alcoholic.into());
        self
    }

    /// Set the serving glass.
    #[must_use]
    pub fn with_glass(mut self, glass: impl Into<String>) -> Self {
        self.glass = Some(glass.into());
        self
    }

    /// Set the preparation instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_fifteen_slots() {
        let slots = (0..MAX_INGREDIENT_SLOTS).map(|i| Some(format!("ingredient-{i}")));
        let ingredients = Ingredients::from_slots(slots).expect("fifteen slots fit");
        assert_eq!(ingredients.present().count(), MAX_INGREDIENT_SLOTS);
    }

    #[rstest]
    fn rejects_sixteen_slots() {
        let slots = (0..=MAX_INGREDIENT_SLOTS).map(|i| Some(format!("ingredient-{i}")));
        let err = Ingredients::from_slots(slots).expect_err("sixteen slots overflow");
        assert_eq!(err, IngredientsError::TooManySlots { found: 16 });
    }

    #[rstest]
    #[case(vec![None, None], 0)]
    #[case(vec![Some(""), Some("Gin")], 1)]
    #[case(vec![Some("Gin"), Some("Gin")], 2)]
    #[case(vec![Some(" "), None], 1)]
    fn present_skips_empty_slots(#[case] slots: Vec<Option<&str>>, #[case] expected: usize) {
        let ingredients = Ingredients::from_slots(slots).expect("valid slots");
        assert_eq!(ingredients.present().count(), expected);
    }

    #[rstest]
    fn builder_sets_details() {
        let cocktail = Cocktail::new("1", "Negroni", Ingredients::default())
            .with_thumbnail("negroni.jpg")
            .with_category("Ordinary Drink")
            .with_alcoholic("Alcoholic")
            .with_instructions("Stir.");
        assert_eq!(cocktail.thumbnail.as_deref(), Some("negroni.jpg"));
        assert_eq!(cocktail.category.as_deref(), Some("Ordinary Drink"));
        assert_eq!(cocktail.alcoholic.as_deref(), Some("Alcoholic"));
        assert_eq!(cocktail.instructions.as_deref(), Some("Stir."));
        assert!(cocktail.glass.is_none());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_rejects_oversized_slots() {
        let slots: Vec<Option<String>> = vec![Some("x".to_owned()); 16];
        let json = serde_json::to_string(&slots).expect("encode slots");
        let result: Result<Ingredients, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }
}
