//! Binary entrypoint for the `ShopSphere` admin console server.

use std::process::ExitCode;

use shopsphere_console::start_console;

/// Load configuration, seed the moderation store and serve the console API.
fn main() -> ExitCode {
    start_console::run()
}
