//! Parse TheCocktailDB drink exports into catalogue cocktails.
//!
//! The export is the `{"drinks": [...]}` envelope returned by the public
//! search and lookup endpoints. Each drink carries up to fifteen
//! `strIngredientN` fields; slot order is preserved so callers can pair
//! ingredients with the matching `strMeasureN` values later.

use std::io::{BufReader, Read};

use barback_core::{Cocktail, CocktailId, Ingredients, MAX_INGREDIENT_SLOTS};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while importing a drinks export.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The export file could not be opened.
    #[error("failed to open drinks export at {path}")]
    Open {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The export was not valid JSON or did not match the envelope.
    #[error("failed to parse drinks export")]
    Parse {
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The export's `drinks` list was `null` or empty.
    #[error("drinks export contains no drinks")]
    NoDrinks,
}

#[derive(Debug, Deserialize)]
struct DrinksEnvelope {
    drinks: Option<Vec<RawDrink>>,
}

#[derive(Debug, Deserialize)]
struct RawDrink {
    #[serde(rename = "idDrink")]
    id: Option<String>,
    #[serde(rename = "strDrink")]
    name: Option<String>,
    #[serde(rename = "strDrinkThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strAlcoholic")]
    alcoholic: Option<String>,
    #[serde(rename = "strGlass")]
    glass: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl RawDrink {
    fn ingredient_slots(&self) -> Vec<Option<String>> {
        let mut slots: Vec<Option<String>> = (1..=MAX_INGREDIENT_SLOTS)
            .map(|slot| {
                self.rest
                    .get(&format!("strIngredient{slot}"))
                    .and_then(Value::as_str)
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned)
            })
            .collect();
        while slots.last().is_some_and(Option::is_none) {
            slots.pop();
        }
        slots
    }

    fn into_cocktail(self) -> Option<Cocktail> {
        let Some(id) = self.id.as_deref().and_then(non_blank) else {
            log::warn!("skipping drink without idDrink");
            return None;
        };
        let Some(name) = self.name.as_deref().and_then(non_blank) else {
            log::warn!("skipping drink {id} without strDrink");
            return None;
        };
        // At most MAX_INGREDIENT_SLOTS slots are ever collected.
        let ingredients = Ingredients::from_slots(self.ingredient_slots()).ok()?;

        let mut cocktail = Cocktail::new(CocktailId::new(id), name, ingredients);
        cocktail.thumbnail = self.thumbnail.as_deref().and_then(non_blank);
        cocktail.category = self.category.as_deref().and_then(non_blank);
        cocktail.alcoholic = self.alcoholic.as_deref().and_then(non_blank);
        cocktail.glass = self.glass.as_deref().and_then(non_blank);
        cocktail.instructions = self.instructions.as_deref().and_then(non_blank);
        Some(cocktail)
    }
}

// Values are kept verbatim; ingredient matching is exact.
fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_owned())
}

/// Parse a TheCocktailDB `{"drinks": [...]}` export.
///
/// Drinks missing an identifier or a name are skipped with a warning. Blank
/// descriptive fields are treated as absent. Ingredient slots are absent only
/// when null or empty, and trailing absent slots are dropped.
///
/// # Errors
/// Returns [`ImportError::Parse`] for malformed JSON and
/// [`ImportError::NoDrinks`] when the export holds no drinks at all.
///
/// # Examples
/// ```
/// use barback_data::parse_drinks;
///
/// let export = br#"{"drinks":[{"idDrink":"11007","strDrink":"Margarita",
///     "strIngredient1":"Tequila","strIngredient2":"Triple sec","strIngredient3":null}]}"#;
/// let cocktails = parse_drinks(&export[..]).unwrap();
/// assert_eq!(cocktails.len(), 1);
/// assert_eq!(cocktails[0].ingredients.present().count(), 2);
/// ```
pub fn parse_drinks<R: Read>(reader: R) -> Result<Vec<Cocktail>, ImportError> {
    let envelope: DrinksEnvelope =
        serde_json::from_reader(reader).map_err(|source| ImportError::Parse { source })?;
    let drinks = envelope.drinks.unwrap_or_default();
    if drinks.is_empty() {
        return Err(ImportError::NoDrinks);
    }
    let total = drinks.len();
    let cocktails: Vec<Cocktail> = drinks
        .into_iter()
        .filter_map(RawDrink::into_cocktail)
        .collect();
    log::debug!("parsed {} of {total} drinks", cocktails.len());
    Ok(cocktails)
}

/// Open and parse a drinks export stored on disk.
///
/// # Errors
/// Returns [`ImportError::Open`] when the file cannot be opened, otherwise
/// the errors of [`parse_drinks`].
pub fn import_drinks_file(path: &Utf8Path) -> Result<Vec<Cocktail>, ImportError> {
    let file = barback_fs::open_utf8_file(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_drinks(BufReader::new(file))
}
