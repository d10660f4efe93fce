//! `rt` - personal ticket tracker
//!
//! Tickets are JSON files in nested project directories under `~/rtckt`.
//! Closing a ticket unblocks the sibling tickets that were waiting on it.

use rtckt::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
