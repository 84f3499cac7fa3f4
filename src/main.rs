//! TOTE: pari-mutuel pool and dividend calculator
//!
//! Entry point. Loads configuration, initialises structured logging on
//! stderr, then reads wagers from stdin until the result line and prints
//! the dividends on stdout.

use anyhow::Result;
use std::io;
use tracing::info;

use tote::config::AppConfig;
use tote::engine::Tote;
use tote::session::{self, SessionOutcome};

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let path = AppConfig::resolve_path();
    let cfg = AppConfig::load_or_default(&path)?;
    info!(
        config = %path,
        win = %cfg.commission.win,
        place = %cfg.commission.place,
        exacta = %cfg.commission.exacta,
        increment = %cfg.money.increment,
        "TOTE starting up"
    );

    let mut tote = Tote::new(cfg.dividend_config());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = session::run(&mut tote, stdin.lock(), &mut stdout.lock())?;

    match &report.outcome {
        SessionOutcome::Settled(settlement) => {
            for totals in &settlement.pools {
                info!(pool = %totals, "Final pool");
            }
        }
        SessionOutcome::Unsettled => {
            info!(wagers = report.wagers_accepted, "Exiting without settlement");
        }
    }

    Ok(())
}

/// Initialise the `tracing` subscriber on stderr.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tote=info"));

    let json_logging = std::env::var("TOTE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(io::stderr)
            .init();
    }
}
