//! Account Ledger CLI
//!
//! Command-line interface for importing account files and applying transfers.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv > listing.csv
//! cargo run -- accounts.csv more_accounts.json --output json
//! cargo run -- accounts.xml --transfer <FROM>,<TO>,200.00 --min-balance 100
//! RUST_LOG=debug cargo run -- --log-format json accounts.csv
//! ```
//!
//! The program imports every input file in order, applies each `--transfer`,
//! and writes the filtered account listing to stdout. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not readable, unsupported format, invalid record, rejected transfer, etc.)

use account_ledger::{cli, runner};
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_tracing(args.log_format);

    let mut output = std::io::stdout();
    if let Err(e) = runner::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
