use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    mdsite::logging::init("info").context("init logging")?;

    let cli = mdsite::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = mdsite::config::SiteConfig::from_sources(
        cli.site.config.as_deref(),
        cli.site.root.as_deref(),
    )
    .context("load site config")?;

    match cli.command {
        mdsite::cli::Command::Sitemap(args) => {
            mdsite::commands::sitemap(&config, args)
                .await
                .context("sitemap")?;
        }
        mdsite::cli::Command::Topics {
            command: mdsite::cli::TopicsCommand::Check,
        } => {
            mdsite::commands::topics_check(&config)
                .await
                .context("topics check")?;
        }
        mdsite::cli::Command::Wiki {
            command: mdsite::cli::WikiCommand::Page(args),
        } => {
            mdsite::commands::wiki_page(&config, args)
                .await
                .context("wiki page")?;
        }
        mdsite::cli::Command::Wiki {
            command: mdsite::cli::WikiCommand::Search(args),
        } => {
            mdsite::commands::wiki_search(&config, args)
                .await
                .context("wiki search")?;
        }
    }

    Ok(())
}
