//! `sitenav url`, `page-id`, `info`, `first-child` and `selected` commands.

use clap::Args;
use sitenav_graph::PageId;

use super::RequestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the url command.
#[derive(Args)]
pub(crate) struct UrlArgs {
    /// Page id.
    page_id: u32,

    /// Resolve in another language than the request's.
    #[arg(long = "in", value_name = "LANGUAGE")]
    other_language: Option<String>,
}

impl UrlArgs {
    /// Print the URL of a page.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let session = request.open()?;
        let other_language = session.other_language(self.other_language.as_deref())?;
        let nav = session.request();
        let url = match other_language {
            Some(language) => nav.resolver().in_language(language).url_for(PageId(self.page_id)),
            None => nav.url_for(PageId(self.page_id)),
        };
        Output::new().result(&url);
        Ok(())
    }
}

/// Arguments for the page-id command.
#[derive(Args)]
pub(crate) struct PageIdArgs {
    /// URL path, without the language prefix.
    url: String,
}

impl PageIdArgs {
    /// Print the id of the page owning a URL.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let session = request.open()?;
        let nav = session.request();
        Output::new().result(&nav.page_id_for(&self.url).to_string());
        Ok(())
    }
}

/// Arguments for the info command.
#[derive(Args)]
pub(crate) struct InfoArgs {
    /// Page id.
    page_id: u32,
}

impl InfoArgs {
    /// Print a page record with its position in the graph as JSON.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let output = Output::new();
        let session = request.open()?;
        let nav = session.request();
        match nav.resolver().info_for(PageId(self.page_id)) {
            Some(info) => output.json(&info),
            None => {
                output.warning(&format!("Page {} not found", self.page_id));
                Ok(())
            }
        }
    }
}

/// Arguments for the first-child command.
#[derive(Args)]
pub(crate) struct FirstChildArgs {
    /// Page id.
    page_id: u32,
}

impl FirstChildArgs {
    /// Print the id of a page's first child.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let output = Output::new();
        let session = request.open()?;
        let nav = session.request();
        match nav.resolver().first_child_of(PageId(self.page_id)) {
            Some(child) => output.result(&child.to_string()),
            None => output.warning(&format!("Page {} has no children", self.page_id)),
        }
        Ok(())
    }
}

/// Print the selected page ids of the requested path, deepest first.
pub(crate) fn selected(request: &RequestArgs) -> Result<(), CliError> {
    let session = request.open()?;
    let nav = session.request();
    let ids: Vec<PageId> = nav.selected().iter().collect();
    Output::new().json(&ids)
}
