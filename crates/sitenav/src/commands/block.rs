//! `sitenav block` command implementation.

use std::collections::BTreeMap;

use clap::Args;
use sitenav_core::BlockQuery;
use sitenav_graph::BlockId;

use super::RequestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the block command.
#[derive(Args)]
pub(crate) struct BlockArgs {
    /// Module hosting the block.
    #[arg(required_unless_present = "id")]
    module: Option<String>,

    /// Module action.
    #[arg(short, long)]
    action: Option<String>,

    /// Block data the page must carry, as key=value (repeatable).
    #[arg(long = "data", value_name = "KEY=VALUE")]
    data: Vec<String>,

    /// Look up a block by id instead of by module.
    #[arg(long, conflicts_with_all = ["module", "action", "data"])]
    id: Option<BlockId>,

    /// Resolve in another language than the request's.
    #[arg(long = "in", value_name = "LANGUAGE")]
    other_language: Option<String>,
}

impl BlockArgs {
    /// Print the URL of the page hosting a block.
    pub(crate) fn execute(self, request: &RequestArgs) -> Result<(), CliError> {
        let data = parse_data(&self.data)?;
        let session = request.open()?;
        let other_language = session.other_language(self.other_language.as_deref())?;
        let nav = session.request();

        let url = if let Some(id) = self.id {
            nav.block_url_by_id(id, other_language)
        } else {
            let module = self.module.as_deref().unwrap_or_default();
            let mut query = BlockQuery::new(module);
            if let Some(action) = &self.action {
                query = query.action(action);
            }
            if let Some(language) = other_language {
                query = query.language(language);
            }
            if let Some(data) = &data {
                query = query.data(data);
            }
            nav.block_url(&query)
        };

        Output::new().result(&url);
        Ok(())
    }
}

/// Parse `key=value` pairs. No pairs means no data filter.
fn parse_data(pairs: &[String]) -> Result<Option<BTreeMap<String, String>>, CliError> {
    if pairs.is_empty() {
        return Ok(None);
    }
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .ok_or_else(|| {
                    CliError::Validation(format!("Invalid --data '{pair}', expected KEY=VALUE"))
                })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Some)
}
