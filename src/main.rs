use clap::Parser;
use oneminai_proxy::{build_router, proxy, AppState, ProxyConfig, SharedLogger};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "oneminai-proxy",
    about = "OpenAI-compatible chat completions proxy for the 1minAI API",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config and FASTAPI_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log file path
    #[arg(long, default_value = "oneminai-proxy.log")]
    log_file: PathBuf,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,

    /// Send one test prompt to 1minAI, print the reply and exit
    #[arg(long)]
    probe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oneminai_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in oneminai_proxy::config::config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let mut config = ProxyConfig::find_and_load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let logger = SharedLogger::new(&cli.log_file)?;

    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()?;

    if cli.probe {
        return run_probe(&config, &client, &logger).await;
    }

    info!("oneminai-proxy v{}", env!("CARGO_PKG_VERSION"));
    info!("  Provider:  {}", config.features_url());
    info!("  API key:   {}", config.masked_api_key());
    info!("  Timeout:   {}s", config.provider.timeout_secs);
    info!("  Bind:      {}", config.bind_addr());
    info!("  Log file:  {}", cli.log_file.display());

    if config.api_key.is_none() {
        warn!(
            "{} is not set; completions will answer with a configuration error",
            config.provider.api_key_env
        );
    }
    if config.reload {
        warn!("Reload was requested but has no effect on a compiled binary");
    }

    logger.info(
        "startup",
        format!(
            "Starting oneminai-proxy bind={} api_key_configured={}",
            config.bind_addr(),
            config.api_key.is_some()
        ),
    );

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, client, logger));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_probe(
    config: &ProxyConfig,
    client: &reqwest::Client,
    logger: &SharedLogger,
) -> anyhow::Result<()> {
    println!("Probing {}", config.features_url());
    println!("API key: {}", config.masked_api_key());
    println!("Prompt:  {}", proxy::PROBE_PROMPT);

    let (status, body) = proxy::probe(config, client, logger).await?;

    println!("Response status: {}", status);
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
