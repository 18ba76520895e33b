//! Shared utilities for shelfdash integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod scripted_client;

pub use fixtures::{author_profile, author_works, search_doc, search_response, test_config};
pub use scripted_client::ScriptedClient;

/// Install a test subscriber once; later calls are no-ops
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfdash=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
