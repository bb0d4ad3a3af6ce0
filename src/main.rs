use anyhow::Result;
use clap::Parser;
use verbatim::app::{TranscribeArgs, run_info_command, run_transcribe_command};
use verbatim::cli::{Cli, Commands};
use verbatim::config::{Config, default_config_path};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path)?.with_env_overrides();

    match cli.command {
        None => {
            if cli.files.is_empty() {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                return Ok(());
            }
            run_transcribe_command(
                config,
                TranscribeArgs {
                    files: cli.files,
                    language: cli.language,
                    prompt: cli.prompt,
                    model: cli.model,
                    chunk_duration_ms: cli.chunk_duration,
                    output: cli.output,
                    text: cli.text,
                    quiet: cli.quiet,
                },
            )
            .await?;
        }
        Some(Commands::Info { file }) => {
            run_info_command(&file)?;
        }
    }

    Ok(())
}
