//! `rw meta` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::{CliSettings, Config};
use rw_nav::{Location, RouteMetaResolver, TreeRouteMeta};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Location to resolve (may include query or fragment).
    #[arg(long)]
    path: String,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route tree file, YAML or JSON (overrides config).
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the route file fails to load.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            routes: self.routes,
            force_expanded: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let tree = super::load_routes(&config, output)?;

        let location = Location::new(self.path);
        let meta = TreeRouteMeta.route_meta(&location, tree.root());
        if meta.route.is_none() {
            tracing::info!(pathname = location.pathname(), "Location matches no route");
        }

        output.result(&format!("{}\n", serde_json::to_string_pretty(&meta)?))?;
        Ok(())
    }
}
