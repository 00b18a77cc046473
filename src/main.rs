//! Student Portal API - student records CRUD service backed by MongoDB

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_portal_api::api::{self, AppState};
use student_portal_api::config::Config;
use student_portal_api::store::StudentStore;

#[derive(Parser)]
#[command(name = "student-portal-api")]
#[command(about = "Student records CRUD API backed by MongoDB")]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("student_portal_api={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Build the store once and inject it into every handler. A failed ping is
    // logged but does not stop the server: handlers fail at first use instead.
    let store = Arc::new(StudentStore::connect(&config).await?);
    match store.ping().await {
        Ok(()) => tracing::info!("MongoDB connected"),
        Err(e) => tracing::error!("MongoDB connection error: {}", e),
    }

    let state = AppState { store };
    let router = api::create_router(state, &config.allowed_origin)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cli.port)).await?;

    tracing::info!("Starting HTTP server on port {}", cli.port);
    println!("Student portal API running at http://localhost:{}", cli.port);
    println!("  API:      http://localhost:{}/api/students", cli.port);
    println!("  API Docs: http://localhost:{}/api/docs", cli.port);
    println!("  Health:   http://localhost:{}/api/health", cli.port);

    axum::serve(listener, router).await?;

    Ok(())
}
