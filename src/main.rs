use anyhow::Result;
use clap::Parser;

use justdoit::cli::{Cli, CliCommand};
use justdoit::logging::{self, LogTarget};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = justdoit::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(CliCommand::Tui) | None => {
            logging::init_tracing(
                cli.log_filter.as_deref(),
                "info",
                LogTarget::File(config.log_path().to_path_buf()),
            )?;
            justdoit::tui::run(config)?;
        }
        Some(command) => {
            logging::init_tracing(cli.log_filter.as_deref(), "warn", LogTarget::Stderr)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            justdoit::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
