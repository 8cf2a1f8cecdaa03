//! CLI command implementations.
//!
//! Every command simulates one request: configuration and snapshots are
//! loaded, a [`Navigator`] is built and the command runs against the
//! [`RequestNavigation`](sitenav_core::RequestNavigation) of the requested
//! language, path and actor.

pub(crate) mod block;
pub(crate) mod lookup;
pub(crate) mod menu;

use std::path::PathBuf;

use clap::Args;
use sitenav_config::{CliSettings, Config, MalformedData, SiteConfig};
use sitenav_core::{
    ActionSlugs, Actor, Anonymous, AuthProvider, JinjaTemplates, Navigator, RequestNavigation,
    SiteSettings, path_segments,
};
use sitenav_graph::{GroupId, MalformedAuthPolicy, PageId};
use sitenav_graph_fs::FsGraphProvider;

use crate::error::CliError;

pub(crate) use block::BlockArgs;
pub(crate) use lookup::{FirstChildArgs, InfoArgs, PageIdArgs, UrlArgs};
pub(crate) use menu::{MenuArgs, TreeArgs};

/// Arguments shared by all commands: where the site lives and who asks.
#[derive(Args)]
pub(crate) struct RequestArgs {
    /// Path to configuration file (default: auto-discover sitenav.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Request language (default: first configured language).
    #[arg(short, long, global = true, env = "SITENAV_LANGUAGE")]
    language: Option<String>,

    /// Snapshot directory (overrides config).
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Template directory (overrides config).
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Prefix URLs with the language (overrides config).
    #[arg(long, global = true, value_name = "BOOL")]
    multi_language: Option<bool>,

    /// Enable the meta navigation (overrides config).
    #[arg(long, global = true, value_name = "BOOL")]
    meta_navigation: Option<bool>,

    /// Requested URL path, without the language prefix.
    #[arg(short, long, global = true, default_value = "/")]
    path: String,

    /// Simulate a logged-in visitor.
    #[arg(long, global = true)]
    authenticated: bool,

    /// Profile groups of the visitor (implies --authenticated).
    #[arg(long, global = true, value_delimiter = ',')]
    groups: Vec<GroupId>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl RequestArgs {
    /// Load configuration and snapshots and build the engine.
    pub(crate) fn open(&self) -> Result<Session, CliError> {
        let cli_settings = CliSettings {
            snapshot_dir: self.snapshot_dir.clone(),
            template_dir: self.template_dir.clone(),
            multi_language: self.multi_language,
            meta_navigation: self.meta_navigation,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let language = self
            .language
            .clone()
            .unwrap_or_else(|| config.default_language().to_owned());
        check_language(&config.site, &language)?;

        let policy = match config.auth.malformed_data {
            MalformedData::Allow => MalformedAuthPolicy::FailOpen,
            MalformedData::Deny => MalformedAuthPolicy::FailClosed,
        };
        tracing::info!(
            language = %language,
            snapshot_dir = %config.graph_resolved.snapshot_dir.display(),
            "Loading navigation snapshots"
        );
        let provider = FsGraphProvider::open(
            config.graph_resolved.snapshot_dir.clone(),
            &config.site.languages,
            policy,
        )?;

        let templates = match &config.templates_resolved.dir {
            Some(dir) => JinjaTemplates::with_dir(dir.clone()),
            None => JinjaTemplates::new(),
        };
        let settings = SiteSettings {
            multi_language: config.site.is_multi_language(),
            meta_navigation: config.site.meta_navigation,
            not_found_page_id: PageId(config.site.not_found_page_id),
            default_template: config.templates_resolved.navigation.clone(),
        };

        let navigator = Navigator::new(provider)
            .with_templates(templates)
            .with_slugifier(ActionSlugs::from(config.actions.clone()))
            .with_settings(settings);

        Ok(Session {
            navigator,
            site: config.site,
            language,
            path: self.path.clone(),
            actor: self.actor(),
        })
    }

    fn actor(&self) -> Box<dyn AuthProvider> {
        if self.authenticated || !self.groups.is_empty() {
            Box::new(Actor::new(self.groups.iter().copied()))
        } else {
            Box::new(Anonymous)
        }
    }
}

/// Reject languages the site is not configured for.
fn check_language(site: &SiteConfig, language: &str) -> Result<(), CliError> {
    if site.has_language(language) {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "Unknown language '{language}'. Configured languages: {}",
            site.languages.join(", ")
        )))
    }
}

/// Engine plus the simulated request.
pub(crate) struct Session {
    navigator: Navigator,
    site: SiteConfig,
    language: String,
    path: String,
    actor: Box<dyn AuthProvider>,
}

impl Session {
    /// Start navigation for the simulated request.
    pub(crate) fn request(&self) -> RequestNavigation<'_> {
        self.navigator
            .request(&self.language, &path_segments(&self.path), self.actor.as_ref())
    }

    /// Validate a language given next to the request's own (`--in`).
    pub(crate) fn other_language<'l>(
        &self,
        language: Option<&'l str>,
    ) -> Result<Option<&'l str>, CliError> {
        if let Some(language) = language {
            check_language(&self.site, language)?;
        }
        Ok(language)
    }
}
