//! Binary entry point: run the UCI protocol loop.
//!
//! Logging goes to stderr through `env_logger` so it can never corrupt
//! the UCI stream on stdout; set `RUST_LOG=debug` for search statistics.

use goshawk::uci::UciEngine;

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let mut engine = UciEngine::new();
    engine.run();
}
