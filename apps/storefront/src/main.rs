//! # Satchel Storefront Entry Point
//!
//! The actual setup is in lib.rs so the session and replay layers can be
//! tested without a binary.

use std::process::ExitCode;

fn main() -> ExitCode {
    match satchel_storefront::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("satchel-storefront: {} ({})", e, e.code());
            ExitCode::FAILURE
        }
    }
}
