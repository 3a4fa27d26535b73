//! Test helpers for composing catalogue workspaces and CLI invocations.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Four drinks sharing gin and lime between them.
pub(super) const DRINKS_EXPORT: &str = r#"{"drinks":[
    {"idDrink":"1","strDrink":"Gimlet","strGlass":"Cocktail glass",
     "strIngredient1":"Gin","strIngredient2":"Lime juice","strIngredient3":null},
    {"idDrink":"2","strDrink":"Gin Tonic","strGlass":"Highball glass",
     "strIngredient1":"Gin","strIngredient2":"Tonic water"},
    {"idDrink":"3","strDrink":"Screwdriver","strGlass":"Highball glass",
     "strIngredient1":"Vodka","strIngredient2":"Orange juice"},
    {"idDrink":"4","strDrink":"Margarita","strGlass":"Cocktail glass",
     "strIngredient1":"Tequila","strIngredient2":"Triple sec","strIngredient3":"Lime juice"}
]}"#;

#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn catalog_db(&self) -> Utf8PathBuf {
        self.path("barback.db")
    }

    pub(super) fn write_export(&self, contents: &str) -> Utf8PathBuf {
        let path = self.path("drinks.json");
        write_utf8(&path, contents.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Parse `argv` as the `barback` binary would and run the command, capturing
/// stdout.
pub(super) fn run_cli<I, S>(argv: I) -> (Result<(), CliError>, String)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut invocation = vec!["barback".to_owned()];
    invocation.extend(argv.into_iter().map(Into::into));
    let mut stdout = Vec::new();
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::from)
        .and_then(|cli| dispatch(cli.command, &mut stdout));
    let printed = String::from_utf8(stdout).expect("stdout utf-8");
    (outcome, printed)
}

/// Import [`DRINKS_EXPORT`] into the workspace catalogue.
pub(super) fn seed_catalogue(workspace: &Workspace) {
    let export = workspace.write_export(DRINKS_EXPORT);
    let (outcome, _) = run_cli([
        "import".to_owned(),
        export.to_string(),
        format!("--{ARG_CATALOG_DB}"),
        workspace.catalog_db().to_string(),
    ]);
    outcome.expect("import drinks export");
}
