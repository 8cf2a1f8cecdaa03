//! `sitenav menu`, `tree` and `footer` commands.

use clap::Args;
use sitenav_core::{MenuOptions, NavigationError};
use sitenav_graph::{NavigationType, PageId};

use super::RequestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Which menu to build.
#[derive(Args)]
pub(crate) struct MenuSelection {
    /// Navigation type: page, footer or meta.
    #[arg(short = 't', long = "type", default_value = "page")]
    navigation_type: String,

    /// Parent page id of the first level.
    #[arg(long, default_value_t = 0)]
    parent: u32,

    /// Number of levels to include (default or 0: all).
    #[arg(short, long)]
    depth: Option<usize>,

    /// Page ids to leave out.
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<u32>,
}

impl MenuSelection {
    fn navigation_type(&self) -> Result<NavigationType, NavigationError> {
        Ok(self.navigation_type.parse::<NavigationType>()?)
    }

    fn options(&self) -> MenuOptions {
        MenuOptions {
            max_depth: self.depth,
            exclude: self.exclude.iter().copied().map(PageId).collect(),
        }
    }
}

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    selection: MenuSelection,
}

impl MenuArgs {
    /// Print the filtered menu tree as JSON.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let ty = self.selection.navigation_type()?;
        let session = request.open()?;
        let nav = session.request();
        let menu = nav.menu(ty, PageId(self.selection.parent), &self.selection.options())?;
        Output::new().json(&menu)
    }
}

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    selection: MenuSelection,

    /// Template to render with (default: templates.navigation from config).
    #[arg(long)]
    template: Option<String>,
}

impl TreeArgs {
    /// Print the rendered menu markup.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let ty = self.selection.navigation_type()?;
        let session = request.open()?;
        let nav = session.request();
        let html = nav.render(
            ty,
            PageId(self.selection.parent),
            &self.selection.options(),
            self.template.as_deref(),
        )?;
        Output::new().result(&html);
        Ok(())
    }
}

/// Print the footer links as JSON.
pub(crate) fn footer(request: &RequestArgs) -> Result<(), CliError> {
    let session = request.open()?;
    let nav = session.request();
    Output::new().json(&nav.footer_links())
}
