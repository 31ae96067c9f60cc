use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub site: SiteArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by the batch CLI and the server binary.
#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// YAML site config. Defaults are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Content root, overriding `content_root` from the config.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write sitemap.xml for the blog and route-table pages.
    Sitemap(SitemapArgs),
    Topics {
        #[command(subcommand)]
        command: TopicsCommand,
    },
    Wiki {
        #[command(subcommand)]
        command: WikiCommand,
    },
}

#[derive(Debug, Args)]
pub struct SitemapArgs {
    /// Output file.
    #[arg(long, default_value = "app/static/sitemap.xml")]
    pub out: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum TopicsCommand {
    /// Fail if two topic names normalize to the same key.
    Check,
}

#[derive(Debug, Subcommand)]
pub enum WikiCommand {
    /// Print a topic page context as JSON.
    Page(WikiPageArgs),
    /// Print ranked search hits as JSON.
    Search(WikiSearchArgs),
}

#[derive(Debug, Args)]
pub struct WikiPageArgs {
    #[arg(long)]
    pub topic: String,
}

#[derive(Debug, Args)]
pub struct WikiSearchArgs {
    #[arg(long)]
    pub query: String,

    /// Overrides `wiki.result_limit`.
    #[arg(long)]
    pub limit: Option<usize>,
}
