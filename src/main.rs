use anyhow::Result;
use clap::Parser;
use sepsis_threshold::cli::{Cli, Commands};
use sepsis_threshold::commands::{self, EvaluateConfig, SweepConfig};
use sepsis_threshold::observability::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            params,
            format,
            output,
            include_sweep,
            plain,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_evaluate(EvaluateConfig {
                params,
                format,
                output,
                include_sweep,
                plain,
            })
        }
        Commands::Sweep {
            params,
            format,
            output,
            plain,
            verbosity,
        } => {
            init_logging(verbosity);
            commands::handle_sweep(SweepConfig {
                params,
                format,
                output,
                plain,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            commands::init_config(force)
        }
    }
}
