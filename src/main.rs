use clap::Parser;
use sec::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable that controls diagnostic log verbosity.
const LOG_ENV: &str = "SEC_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Set {
            ref name,
            ref value,
        } => sec::cli::commands::set::execute(&cli, name, value.as_deref()),
        Commands::Get { ref name } => sec::cli::commands::get::execute(&cli, name),
        Commands::Delete { ref name, force } => {
            sec::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::List => sec::cli::commands::list::execute(&cli),
        Commands::SetPin => sec::cli::commands::set_pin::execute(&cli),
        Commands::ChangePin => sec::cli::commands::change_pin::execute(&cli),
        Commands::RemovePin => sec::cli::commands::remove_pin::execute(&cli),
        Commands::Export {
            ref format,
            ref output,
        } => sec::cli::commands::export::execute(&cli, format, output.as_deref()),
        Commands::Import {
            ref file,
            ref format,
        } => sec::cli::commands::import_cmd::execute(&cli, file, format.as_deref()),
        Commands::Version => sec::cli::commands::version::execute(),
        Commands::Completions { shell } => sec::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        sec::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr and are off unless `SEC_LOG` asks for them.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
