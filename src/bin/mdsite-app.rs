use std::net::SocketAddr;

use anyhow::Context as _;
use clap::Parser;

use mdsite::app::AppState;
use mdsite::cli::SiteArgs;
use mdsite::config::SiteConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    #[command(flatten)]
    site: SiteArgs,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    mdsite::logging::init("info")?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting mdsite-app");

    let config = SiteConfig::from_sources(args.site.config.as_deref(), args.site.root.as_deref())
        .context("load site config")?;
    if !config.content_root.is_dir() {
        tracing::warn!(
            root = %config.content_root.display(),
            "content root does not exist; pages will 404"
        );
    }
    let state = AppState::new(config).context("build app state")?;
    mdsite::app::server::serve(args.addr, state).await
}
