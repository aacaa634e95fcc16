use clap::Parser;
use movierec::{init_tracing, server::create_router, AppState, Config};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &args.log_level);
    }
    init_tracing();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, using default configuration");
        Config::default()
    };

    info!(
        "Starting movierec server with config: {:?}",
        config.server
    );

    // Startup is all-or-nothing: a missing or corrupt input file must
    // terminate the process before any request is accepted.
    let state = match AppState::new(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    info!(
        "Startup complete: {} movies, {} users, model bound",
        state.catalog.len(),
        state.interactions.user_count()
    );

    let app = create_router(state);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
