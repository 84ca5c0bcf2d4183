mod code_check;
mod config;
mod errors;
mod lesson;
mod routes;
mod state;
mod telemetry;
mod util;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::code_check::validator::CodeValidator;
use crate::config::Config;
use crate::lesson::mini_test::StrictMiniTestValidator;
use crate::lesson::parser::LessonParser;
use crate::lesson::sanitizer::{default_filler_patterns, load_filler_patterns, Sanitizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    telemetry::init_tracing(&config);

    info!("Starting Tutor API v{}", env!("CARGO_PKG_VERSION"));

    // Filler table: external TOML if configured, built-in phrases otherwise
    let fillers = match &config.filler_patterns_path {
        Some(path) => load_filler_patterns(path)?,
        None => default_filler_patterns(),
    };
    let sanitizer = Sanitizer::new(&fillers)?;
    info!("Sanitizer initialized ({} filler patterns)", fillers.len());

    let lesson_parser = Arc::new(LessonParser::new(
        sanitizer,
        Arc::new(StrictMiniTestValidator),
    ));
    let code_validator = Arc::new(CodeValidator::default());

    // Build app state
    let state = AppState {
        lesson_parser,
        code_validator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
