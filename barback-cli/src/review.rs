//! Review command implementation for the Barback CLI.

use barback_core::{CocktailId, NewReview, Rating, ReviewId, UserId};
use barback_data::{PersistCatalogError, add_review, remove_review, update_review};
use barback_scorer::ReviewFilter;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{
    catalog_db_or_default, open_catalog, optional_coordinate, require_existing, resolve_place,
};
use crate::output::write_json;
use crate::{
    ARG_CATALOG_DB, ARG_COCKTAIL, ARG_COMMENT, ARG_LAT, ARG_LNG, ARG_PLACE, ARG_RATING, ARG_REVIEW,
    ARG_USER, CliError, ENV_REVIEW_COCKTAIL, ENV_REVIEW_ID, ENV_REVIEW_PLACE, ENV_REVIEW_RATING,
    ENV_REVIEW_USER,
};

#[derive(Debug, Subcommand)]
pub(crate) enum ReviewCommand {
    /// Rate a cocktail at a place.
    Add(ReviewArgs),
    /// Change the rating or comment of your own review.
    Update(ReviewUpdateArgs),
    /// Delete your own review.
    Remove(ReviewRemoveArgs),
    /// List reviews by author, cocktail or place.
    List(ReviewListArgs),
}

/// CLI arguments for the `review add` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Record a one-to-five star rating of a cocktail at a place. \
                 The place is created on first sight from its external \
                 identifier; its location is stored the first time one is \
                 supplied.",
    about = "Rate a cocktail at a place"
)]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct ReviewArgs {
    /// Author of the review.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Reviewed cocktail identifier.
    #[arg(long = ARG_COCKTAIL, value_name = "id")]
    #[serde(default)]
    pub(crate) cocktail: Option<String>,
    /// External (Google) identifier of the place.
    #[arg(long = ARG_PLACE, value_name = "external-id")]
    #[serde(default)]
    pub(crate) place: Option<String>,
    /// Star rating from 1 to 5.
    #[arg(long = ARG_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) rating: Option<u8>,
    /// Optional free-text comment.
    #[arg(long = ARG_COMMENT, value_name = "text")]
    #[serde(default)]
    pub(crate) comment: Option<String>,
    /// Latitude of the place in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the place in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl ReviewArgs {
    fn into_config(self) -> Result<ReviewConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReviewConfig::try_from(merged)
    }
}

/// Resolved `review` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReviewConfig {
    pub(crate) review: NewReview,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<ReviewArgs> for ReviewConfig {
    type Error = CliError;

    fn try_from(args: ReviewArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_REVIEW_USER,
        })?;
        let cocktail = args.cocktail.ok_or(CliError::MissingArgument {
            field: ARG_COCKTAIL,
            env: ENV_REVIEW_COCKTAIL,
        })?;
        let place_external_id = args.place.ok_or(CliError::MissingArgument {
            field: ARG_PLACE,
            env: ENV_REVIEW_PLACE,
        })?;
        let stars = args.rating.ok_or(CliError::MissingArgument {
            field: ARG_RATING,
            env: ENV_REVIEW_RATING,
        })?;
        let review = NewReview {
            user: UserId::new(user),
            cocktail: CocktailId::new(cocktail),
            place_external_id,
            location: optional_coordinate(args.lat, args.lng)?,
            rating: Rating::new(stars)?,
            comment: args.comment.filter(|text| !text.trim().is_empty()),
        };
        Ok(Self {
            review,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

/// Identifier of the stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ReviewReport {
    pub(crate) review: ReviewId,
    pub(crate) cocktail: CocktailId,
    pub(crate) place: String,
}

fn persist_error(path: &Utf8Path) -> impl FnOnce(PersistCatalogError) -> CliError + '_ {
    move |source| CliError::PersistCatalog {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn run_review_with(args: ReviewArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    let id = add_review(&config.catalog_db, &config.review)
        .map_err(persist_error(&config.catalog_db))?;
    let NewReview {
        cocktail,
        place_external_id,
        ..
    } = config.review;
    write_json(
        writer,
        &ReviewReport {
            review: id,
            cocktail,
            place: place_external_id,
        },
    )
}

fn required_user(user: Option<String>) -> Result<UserId, CliError> {
    user.map(UserId::new).ok_or(CliError::MissingArgument {
        field: ARG_USER,
        env: ENV_REVIEW_USER,
    })
}

fn required_review(review: Option<u64>) -> Result<ReviewId, CliError> {
    review.map(ReviewId::new).ok_or(CliError::MissingArgument {
        field: ARG_REVIEW,
        env: ENV_REVIEW_ID,
    })
}

/// CLI arguments for the `review update` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Change the rating or comment of your own review")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct ReviewUpdateArgs {
    /// Identifier of the review to change.
    #[arg(long = ARG_REVIEW, value_name = "id")]
    #[serde(default)]
    pub(crate) review: Option<u64>,
    /// Author of the review.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// New star rating from 1 to 5.
    #[arg(long = ARG_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) rating: Option<u8>,
    /// New comment; blank text keeps the current one.
    #[arg(long = ARG_COMMENT, value_name = "text")]
    #[serde(default)]
    pub(crate) comment: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl ReviewUpdateArgs {
    fn into_config(self) -> Result<ReviewUpdateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReviewUpdateConfig::try_from(merged)
    }
}

/// Resolved `review update` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReviewUpdateConfig {
    pub(crate) review: ReviewId,
    pub(crate) user: UserId,
    pub(crate) rating: Option<Rating>,
    pub(crate) comment: Option<String>,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<ReviewUpdateArgs> for ReviewUpdateConfig {
    type Error = CliError;

    fn try_from(args: ReviewUpdateArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            review: required_review(args.review)?,
            user: required_user(args.user)?,
            rating: args.rating.map(Rating::new).transpose()?,
            comment: args.comment,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

/// CLI arguments for the `review remove` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Delete your own review")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct ReviewRemoveArgs {
    /// Identifier of the review to delete.
    #[arg(long = ARG_REVIEW, value_name = "id")]
    #[serde(default)]
    pub(crate) review: Option<u64>,
    /// Author of the review.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl ReviewRemoveArgs {
    fn into_config(self) -> Result<ReviewRemoveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReviewRemoveConfig::try_from(merged)
    }
}

/// Resolved `review remove` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReviewRemoveConfig {
    pub(crate) review: ReviewId,
    pub(crate) user: UserId,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<ReviewRemoveArgs> for ReviewRemoveConfig {
    type Error = CliError;

    fn try_from(args: ReviewRemoveArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            review: required_review(args.review)?,
            user: required_user(args.user)?,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReviewAction {
    Update,
    Remove,
}

/// Outcome printed after an author changes one of their reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ReviewChangeReport {
    pub(crate) review: ReviewId,
    pub(crate) user: UserId,
    pub(crate) action: ReviewAction,
}

pub(crate) fn run_review_update_with(
    args: ReviewUpdateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    update_review(
        &config.catalog_db,
        config.review,
        &config.user,
        config.rating,
        config.comment.as_deref(),
    )
    .map_err(persist_error(&config.catalog_db))?;
    write_json(
        writer,
        &ReviewChangeReport {
            review: config.review,
            user: config.user,
            action: ReviewAction::Update,
        },
    )
}

pub(crate) fn run_review_remove_with(
    args: ReviewRemoveArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    remove_review(&config.catalog_db, config.review, &config.user)
        .map_err(persist_error(&config.catalog_db))?;
    write_json(
        writer,
        &ReviewChangeReport {
            review: config.review,
            user: config.user,
            action: ReviewAction::Remove,
        },
    )
}

/// CLI arguments for the `review list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List reviews by author, cocktail or place")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct ReviewListArgs {
    /// Only list reviews written by this user.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Only list reviews of this cocktail.
    #[arg(long = ARG_COCKTAIL, value_name = "id")]
    #[serde(default)]
    pub(crate) cocktail: Option<String>,
    /// Only list reviews left at the place with this external identifier.
    #[arg(long = ARG_PLACE, value_name = "external-id")]
    #[serde(default)]
    pub(crate) place: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

pub(crate) fn run_review_list_with(
    args: ReviewListArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let args = args.load_and_merge().map_err(CliError::Configuration)?;
    let catalog_db = catalog_db_or_default(args.catalog_db);
    let store = open_catalog(&catalog_db)?;
    let mut filter = ReviewFilter::new();
    if let Some(user) = args.user {
        filter = filter.by(UserId::new(user));
    }
    if let Some(cocktail) = args.cocktail {
        filter = filter.of(CocktailId::new(cocktail));
    }
    if let Some(external_id) = args.place {
        filter = filter.at(resolve_place(&store, &external_id)?.id);
    }
    write_json(writer, &filter.run(&store))
}
