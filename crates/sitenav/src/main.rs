//! sitenav CLI - Navigation resolution engine.
//!
//! Resolves menus and links for one simulated request:
//! - `url`, `page-id`: page id to URL and back
//! - `info`, `first-child`: page lookups
//! - `selected`: pages on the requested path
//! - `menu`, `tree`: filtered menu as JSON or rendered markup
//! - `footer`: footer links
//! - `block`: URL of the page hosting a module block

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BlockArgs, FirstChildArgs, InfoArgs, MenuArgs, PageIdArgs, RequestArgs, TreeArgs, UrlArgs};
use output::Output;

/// sitenav - Navigation resolution engine.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    #[command(flatten)]
    request: RequestArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL of a page.
    Url(UrlArgs),
    /// Print the id of the page owning a URL.
    PageId(PageIdArgs),
    /// Print a page record and its position in the graph.
    Info(InfoArgs),
    /// Print the first child of a page.
    FirstChild(FirstChildArgs),
    /// Print the pages on the requested path.
    Selected,
    /// Print a filtered menu tree as JSON.
    Menu(MenuArgs),
    /// Print a rendered menu.
    Tree(TreeArgs),
    /// Print the footer links.
    Footer,
    /// Print the URL of the page hosting a module block.
    Block(BlockArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.request.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let request = &cli.request;
    let result = match cli.command {
        Commands::Url(args) => args.execute(request),
        Commands::PageId(args) => args.execute(request),
        Commands::Info(args) => args.execute(request),
        Commands::FirstChild(args) => args.execute(request),
        Commands::Selected => commands::lookup::selected(request),
        Commands::Menu(args) => args.execute(request),
        Commands::Tree(args) => args.execute(request),
        Commands::Footer => commands::menu::footer(request),
        Commands::Block(args) => args.execute(request),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
