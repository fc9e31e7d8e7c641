// SPDX-License-Identifier: Apache-2.0
use std::env;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Initialize a readable console logger for the CLI
pub fn init_console_tracing() {
    // Skip setting LogTracer if it's already been set
    let _ = LogTracer::init();

    // Get log level from environment or default to INFO
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let filter_level = env::var("RUST_LOG")
                .unwrap_or_else(|_| "mailblast=info".into());
            EnvFilter::new(filter_level)
        });

    // Create console subscriber with pretty formatting
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(env_filter)
        .finish();

    // Set the subscriber as global default
    set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
