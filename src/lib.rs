pub mod annotation;
pub mod app;
pub mod comments;
mod config;
pub mod cursor;
pub mod device;
pub mod dock;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod state;
pub mod surface;
pub use error::{AppError, AppResult};

/// Entrypoint used by higher-level integrations and CLI bindings.
pub fn run() -> AppResult<()> {
    let config = config::load_app_config();
    match config.log_filter.as_deref() {
        Some(filter) => logging::init_with_default(filter),
        None => logging::init(),
    }
    tracing::info!("starting pinmark");

    let comments = app::run_demo_session(&config)?;
    println!("{comments}");

    tracing::info!("demo session complete");
    Ok(())
}
