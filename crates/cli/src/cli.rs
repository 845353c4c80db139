//! Command-line arguments.
//!
//! ```bash
//! # Every ticker directory under ~/tapes
//! tape --home ~/tapes
//!
//! # Only GWRE, with per-line diagnostics
//! TAPE_HOME=~/tapes tape --log-level debug GWRE
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Daily trade tape sentiment and price bucket reports.
///
/// Each sub-directory of the home directory is a ticker directory holding a
/// `tape.json` config and an `input/` folder of daily exports. Results are
/// written back as `<TICKER>.csv` and `summary.txt`.
#[derive(Debug, Parser)]
#[command(name = "tape", version, about = "Trade tape sentiment reports")]
pub struct Cli {
    /// Directory containing one sub-directory per ticker.
    #[arg(long, env = "TAPE_HOME", default_value = ".")]
    pub home: PathBuf,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,

    /// Ticker directories to process. All when omitted.
    #[arg(value_name = "TICKER")]
    pub tickers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tape", "--home", "/data"]).unwrap();
        assert_eq!(cli.home, PathBuf::from("/data"));
        assert_eq!(cli.log_level, "info");
        assert!(!cli.json_logs);
        assert!(cli.tickers.is_empty());
    }

    #[test]
    fn test_tickers_and_flags() {
        let cli = Cli::try_parse_from([
            "tape", "--home", "/data", "--json-logs", "--log-level", "debug", "GWRE", "MSFT",
        ])
        .unwrap();
        assert!(cli.json_logs);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.tickers, vec!["GWRE", "MSFT"]);
    }
}
