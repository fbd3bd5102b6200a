//! forum-sim - scenario driver for forum-core
//!
//! Replays a scripted unit of work against in-memory post aggregates and
//! prints what a persistence layer would have to write.
//!
//! ## Quick Start
//!
//! ```bash
//! # Replay a scenario and show the pending changes
//! forum-sim run scenario.toml
//!
//! # Same, as JSON
//! forum-sim run scenario.toml --json
//!
//! # Show the slug a title gets
//! forum-sim slug "Cool first post!"
//! ```

mod commands;
mod scenario;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
