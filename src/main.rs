use bs_greeks::config::AppConfig;
use bs_greeks::state::AppState;
use bs_greeks::{cli, server};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bs_greeks", about = "Black-Scholes prices, Greeks and price heatmaps")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the dashboard and JSON API (default)
    Serve,
    /// Price one option from values typed at the terminal
    Prompt,
}

#[tokio::main]
async fn main() {
    // Structured logging to stderr so prompt output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Prompt => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout().lock();
            if let Err(e) = cli::run_prompt(&mut input, &mut out, cfg.fd_spot_bump, cfg.fd_vol_bump)
            {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
    }
}

async fn serve(cfg: AppConfig) {
    let addr = cfg.listen_addr();
    tracing::info!(
        dashboard = %cfg.dashboard_dir.display(),
        heatmap_size = cfg.heatmap_size,
        "bs_greeks dashboard starting"
    );

    let app = server::build_router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    tracing::info!("server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
