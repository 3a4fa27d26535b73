//! Import command implementation for the Barback CLI.

use barback_data::{import_drinks_file, persist_catalog_to_sqlite};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, require_existing};
use crate::output::write_json;
use crate::{ARG_CATALOG_DB, ARG_DRINKS, CliError, ENV_IMPORT_DRINKS};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Parse a TheCocktailDB `{\"drinks\": [...]}` export and upsert \
                 every complete drink into the catalogue database. Existing \
                 cocktails keep their favourites, reviews and catalogue \
                 position.",
    about = "Import a TheCocktailDB drinks export"
)]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct ImportArgs {
    /// Path to the JSON drinks export.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) drinks: Option<Utf8PathBuf>,
    /// Path to the SQLite catalogue database (created when missing).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl ImportArgs {
    fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) drinks: Utf8PathBuf,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let drinks = args.drinks.ok_or(CliError::MissingArgument {
            field: ARG_DRINKS,
            env: ENV_IMPORT_DRINKS,
        })?;
        Ok(Self {
            drinks,
            catalog_db: catalog_db_or_default(args.catalog_db),
        })
    }
}

/// Summary printed after a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ImportReport {
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) imported: usize,
}

pub(crate) fn run_import_with(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.drinks, ARG_DRINKS)?;
    let cocktails = import_drinks_file(&config.drinks).map_err(|source| CliError::Import {
        path: config.drinks.clone(),
        source,
    })?;
    let imported = persist_catalog_to_sqlite(&config.catalog_db, &cocktails).map_err(|source| {
        CliError::PersistCatalog {
            path: config.catalog_db.clone(),
            source,
        }
    })?;
    write_json(
        writer,
        &ImportReport {
            catalog_db: config.catalog_db,
            imported,
        },
    )
}
