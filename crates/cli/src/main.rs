use clap::Parser;
use std::process::ExitCode;
use tape_cli::{run, setup_logging, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, cli.json_logs);

    match run(&cli.home, &cli.tickers) {
        Ok(reports) => {
            for report in &reports {
                tracing::info!(
                    ticker = %report.ticker,
                    days = report.month.days,
                    csv = %report.csv_path.display(),
                    summary = %report.summary_path.display(),
                    "Reports written"
                );
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{:#}", error);
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
