//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to exercise `stringlens_core` analysis
//!   without any storage or transport attached.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(value) = args.next() else {
        eprintln!("usage: stringlens_cli <string>");
        eprintln!("stringlens_core version={}", stringlens_core::core_version());
        return ExitCode::FAILURE;
    };

    let properties = stringlens_core::analyze(&value);
    match serde_json::to_string_pretty(&properties) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to render analysis: {err}");
            ExitCode::FAILURE
        }
    }
}
