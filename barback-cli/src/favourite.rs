//! Favourite command implementation for the Barback CLI.

use barback_core::{CocktailId, FavouriteEdge, UserId};
use barback_data::{add_favourite, remove_favourite};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, require_existing};
use crate::output::write_json;
use crate::{
    ARG_CATALOG_DB, ARG_COCKTAIL, ARG_USER, CliError, ENV_FAVOURITE_COCKTAIL, ENV_FAVOURITE_USER,
};

#[derive(Debug, Subcommand)]
pub(crate) enum FavouriteCommand {
    /// Bookmark a cocktail for a user.
    Add(FavouriteArgs),
    /// Remove a user's bookmark.
    Remove(FavouriteArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FavouriteAction {
    Add,
    Remove,
}

/// CLI arguments shared by `favourite add` and `favourite remove`.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Identify the user and cocktail of a bookmark")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct FavouriteArgs {
    /// User who owns the bookmark.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Bookmarked cocktail identifier.
    #[arg(long = ARG_COCKTAIL, value_name = "id")]
    #[serde(default)]
    pub(crate) cocktail: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl FavouriteArgs {
    fn into_config(self) -> Result<FavouriteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FavouriteConfig::try_from(merged)
    }
}

/// Resolved `favourite` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavouriteConfig {
    pub(crate) edge: FavouriteEdge,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<FavouriteArgs> for FavouriteConfig {
    type Error = CliError;

    fn try_from(args: FavouriteArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_FAVOURITE_USER,
        })?;
        let cocktail = args.cocktail.ok_or(CliError::MissingArgument {
            field: ARG_COCKTAIL,
            env: ENV_FAVOURITE_COCKTAIL,
        })?;
        Ok(Self {
            edge: FavouriteEdge::new(user, cocktail),
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

/// Outcome printed after a bookmark change. `changed` is false when the
/// edge was already present (add) or already absent (remove).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FavouriteReport {
    pub(crate) user: UserId,
    pub(crate) cocktail: CocktailId,
    pub(crate) action: FavouriteAction,
    pub(crate) changed: bool,
}

pub(crate) fn run_favourite_with(
    action: FavouriteAction,
    args: FavouriteArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    let outcome = match action {
        FavouriteAction::Add => add_favourite(&config.catalog_db, &config.edge),
        FavouriteAction::Remove => remove_favourite(&config.catalog_db, &config.edge),
    };
    let changed = outcome.map_err(|source| CliError::PersistCatalog {
        path: config.catalog_db.clone(),
        source,
    })?;
    let FavouriteEdge { user, cocktail } = config.edge;
    write_json(
        writer,
        &FavouriteReport {
            user,
            cocktail,
            action,
            changed,
        },
    )
}
