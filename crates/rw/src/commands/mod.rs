//! CLI command implementations.

pub(crate) mod meta;
pub(crate) mod render;

pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;

use rw_config::Config;
use rw_nav::RouteTree;

use crate::error::CliError;
use crate::output::Output;

/// Load the route tree named by `config`, warning when it has no routes.
fn load_routes(config: &Config, output: &Output) -> Result<RouteTree, CliError> {
    let tree = RouteTree::load(&config.routes_path)?;
    if !tree.root().has_children() {
        output.warning(&format!(
            "No routes in {}",
            config.routes_path.display()
        ));
    }
    Ok(tree)
}
