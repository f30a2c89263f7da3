use anyhow::Result;
use clap::Parser;
use codebot::cli::{Cli, Commands};
use codebot::commands::{self, AnalyzeArgs, Environment};
use codebot::formatting::FormattingConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    create_formatting_config(cli.plain).apply();

    match cli.command {
        Commands::Analyze {
            paths,
            language,
            threshold,
            format,
        } => {
            let env = Environment::resolve(cli.config.as_deref(), cli.store)?;
            let args = AnalyzeArgs {
                paths,
                language,
                threshold: threshold.map(|t| t as usize),
                format: format.into(),
            };
            commands::handle_analyze(args, &env.config.analysis)
        }
        Commands::Snippet { action } => {
            let env = Environment::resolve(cli.config.as_deref(), cli.store)?;
            commands::handle_snippet(action, &env)
        }
        Commands::Prompt { action } => commands::handle_prompt(action),
        Commands::Guide => {
            print!("{}", codebot::prompts::tools_guide());
            Ok(())
        }
        Commands::Init { force } => commands::init_config(force),
    }
}

// RUST_LOG wins over -v flags when set
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
