//! Interactive morphology demo
//!
//! ```text
//! morphdemo [IMAGE] [--max-iters N] [--shape rect|ellipse|cross]
//! ```
//!
//! Set `RUST_LOG=debug` to trace every recompute.

use morphdemo::{Args, DemoConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let config = DemoConfig::from(args);

    match morphdemo::app::launch(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
