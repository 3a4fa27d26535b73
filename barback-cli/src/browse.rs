//! Browse command implementation for the Barback CLI.

use barback_core::UserId;
use barback_scorer::{BrowseOrder, CatalogQuery};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, open_catalog};
use crate::output::write_json;
use crate::{ARG_CATALOG_DB, ARG_ORDER, ARG_SEARCH, ARG_USER, CliError};

/// Sort key accepted by `--order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OrderArg {
    /// Name ascending.
    #[default]
    Name,
    /// Most favourited first.
    Popularity,
    /// Most reviewed first.
    Reviews,
}

impl From<OrderArg> for BrowseOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Name => Self::Name,
            OrderArg::Popularity => Self::Popularity,
            OrderArg::Reviews => Self::Reviews,
        }
    }
}

/// CLI arguments for the `browse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Search and sort the catalogue")]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct BrowseArgs {
    /// Case-insensitive text matched against name, category, glass and
    /// ingredients.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Only list cocktails bookmarked by this user.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Sort key.
    #[arg(long = ARG_ORDER, value_enum)]
    #[serde(default)]
    pub(crate) order: Option<OrderArg>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl BrowseArgs {
    fn into_config(self) -> Result<BrowseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(BrowseConfig::from(merged))
    }
}

/// Resolved `browse` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BrowseConfig {
    pub(crate) query: CatalogQuery,
    pub(crate) catalog_db: Utf8PathBuf,
}

impl From<BrowseArgs> for BrowseConfig {
    fn from(args: BrowseArgs) -> Self {
        let mut query = CatalogQuery::new()
            .ordered_by(args.order.unwrap_or_default().into());
        if let Some(text) = args.search {
            query = query.matching(text);
        }
        if let Some(user) = args.user {
            query = query.favourites_of(UserId::new(user));
        }
        Self {
            query,
            catalog_db: catalog_db_or_default(args.catalog_db),
        }
    }
}

pub(crate) fn run_browse_with(args: BrowseArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_catalog(&config.catalog_db)?;
    write_json(writer, &config.query.run(&store))
}
