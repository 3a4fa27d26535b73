//! Recommend command implementation for the Barback CLI.

use barback_core::UserId;
use barback_scorer::{Personalisation, RecommendationScorer};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::catalog::{catalog_db_or_default, open_catalog};
use crate::output::write_json;
use crate::{
    ARG_CATALOG_DB, ARG_LIMIT, ARG_NO_PERSONALISATION, ARG_USER, CliError, ENV_RECOMMEND_USER,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every cocktail by how many of its ingredients appear \
                 among the user's favourites. When nothing overlaps, or \
                 personalisation is disabled, the whole catalogue is listed \
                 by popularity instead.",
    about = "Recommend cocktails for a user"
)]
#[ortho_config(prefix = "BARBACK")]
pub(crate) struct RecommendArgs {
    /// User to recommend cocktails for.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<String>,
    /// Path to the SQLite catalogue database.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Maximum number of personalised recommendations (default 12).
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Skip ingredient matching and list cocktails by popularity.
    #[arg(long = ARG_NO_PERSONALISATION)]
    #[serde(default)]
    pub(crate) no_personalisation: bool,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) user: UserId,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) scorer: RecommendationScorer,
    pub(crate) personalisation: Personalisation,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let user = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_RECOMMEND_USER,
        })?;
        let scorer = match args.limit {
            Some(limit) => RecommendationScorer::with_limit(limit)?,
            None => RecommendationScorer::new(),
        };
        let personalisation = if args.no_personalisation {
            Personalisation::Disabled
        } else {
            Personalisation::Enabled
        };
        Ok(Self {
            user: UserId::new(user),
            catalog_db: catalog_db_or_default(args.catalog_db),
            scorer,
            personalisation,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = open_catalog(&config.catalog_db)?;
    let recommendations =
        config
            .scorer
            .recommend_or_popular(&config.user, &store, config.personalisation);
    write_json(writer, &recommendations)
}
