//! `rw render` command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};
use rw_config::{CliSettings, Config, SidebarConfig};
use rw_sidebar::{
    HtmlLinkRenderer, RenderContext, SidebarItem, SidebarOptions, SidebarRouteTree,
    TokioScheduler, count_links, render_html,
};

use crate::error::CliError;
use crate::output::Output;

/// Output format of rendered snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Nested HTML lists.
    Html,
    /// Item tree as JSON, one document per snapshot.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Locations to render, in navigation order (may include query or fragment).
    #[arg(long = "path", required = true)]
    paths: Vec<String>,

    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route tree file, YAML or JSON (overrides config).
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Path of a navigation in flight.
    #[arg(long)]
    pending: Option<String>,

    /// Expand every branch and hide arrows.
    #[arg(long)]
    force_expanded: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Milliseconds to wait between renders.
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the route file fails to load,
    /// or output cannot be written.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            routes: self.routes,
            force_expanded: self.force_expanded.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let tree = super::load_routes(&config, output)?;

        let scheduler = TokioScheduler::current()?;
        let mut sidebar = SidebarRouteTree::new(sidebar_options(&config.sidebar))
            .with_scheduler(Arc::new(scheduler));
        let interval = Duration::from_millis(self.interval_ms);

        for (index, path) in self.paths.iter().enumerate() {
            if index > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }

            let mut ctx = RenderContext::new(path.as_str());
            if let Some(pending) = &self.pending {
                ctx = ctx.with_pending_route(pending.as_str());
            }

            let items = sidebar.render(&ctx, config.sidebar.force_expanded, tree.root());
            tracing::info!(
                path = %path,
                links = count_links(&items),
                animating = sidebar.is_animating(),
                "Rendered sidebar"
            );

            if self.verbose {
                output.highlight(&format!("==> {path}"));
            }
            output.result(&format_snapshot(path, &items, self.format)?)?;
        }

        if self.verbose && sidebar.is_animating() {
            output.info("Last snapshot taken while a transition was running");
        }

        Ok(())
    }
}

/// Sidebar options from the `[sidebar]` config section.
fn sidebar_options(config: &SidebarConfig) -> SidebarOptions {
    SidebarOptions {
        collapse_duration: config.collapse_duration(),
        pointer_guard_margin: config.pointer_guard_margin(),
        external_link_prefix: config.external_link_prefix.clone(),
        suffix_delimiter: config.path_suffix_delimiter.clone(),
    }
}

fn format_snapshot(path: &str, items: &[SidebarItem], format: Format) -> Result<String, CliError> {
    match format {
        Format::Html => Ok(render_html(items, &HtmlLinkRenderer)),
        Format::Json => {
            let snapshot = serde_json::json!({ "path": path, "items": items });
            Ok(format!("{}\n", serde_json::to_string_pretty(&snapshot)?))
        }
    }
}
