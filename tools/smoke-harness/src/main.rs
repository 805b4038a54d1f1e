//! Smoke harness: walks the register → login → order scenario against a live shop service.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p smoke-harness -- --base-url http://localhost:3000 \
//!     --admin-email admin@example.com --admin-password secret
//! ```
//!
//! Exits 0 when every step passes, exits 1 otherwise.

use anyhow::Result;
use clap::Parser;

mod reporter;
mod runner;
mod scenario;

use reporter::Reporter;
use runner::Runner;

#[derive(Parser)]
#[command(about = "Run the order scenario against a live shop service")]
struct Args {
    /// Base URL of the shop service (e.g. http://localhost:3000)
    #[arg(long)]
    base_url: String,

    /// Email of an existing admin account
    #[arg(long)]
    admin_email: String,

    /// Password of that admin account
    #[arg(long)]
    admin_password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("Running smoke scenario against {}", args.base_url);
    println!();

    let runner = Runner::new(&args.base_url);
    let mut reporter = Reporter::new();
    scenario::run(&runner, &mut reporter, &args.admin_email, &args.admin_password).await;

    reporter.print_summary();

    if reporter.all_passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
