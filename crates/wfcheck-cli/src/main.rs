//! Wind-farm forecasting configuration checker.

use clap::Parser;

use wfcheck_cli::cli::{Cli, Command, log_config_from_cli};
use wfcheck_cli::commands::{run_check, run_farms, run_rules};
use wfcheck_cli::config::Settings;
use wfcheck_cli::logging::init_logging;
use wfcheck_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Check(args) => match run_check(&args, &settings) {
            Ok(batch) => {
                print_summary(&batch);
                if batch.has_errors() { 1 } else { 0 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Farms(args) => match run_farms(&args, &settings) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Rules => match run_rules(&settings) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
