use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use storychat::connector::api::container::DEFAULT_SECRETS_FILE;
use storychat::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "storychat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from a local mock instead of the remote model
    #[arg(long, global = true)]
    mock: bool,

    /// Chat-completion endpoint (default: $STORYCHAT_ENDPOINT or DeepInfra)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Model identifier (default: $STORYCHAT_MODEL or Mixtral 8x7B Instruct)
    #[arg(long, global = true)]
    model: Option<String>,

    /// TOML file holding DEEPINFRA_API_KEY, checked before the environment
    #[arg(long, global = true, default_value = DEFAULT_SECRETS_FILE)]
    secrets_file: String,

    /// Seed instruction for new stories
    #[arg(long, global = true)]
    system_prompt: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        mock_completions: cli.mock,
        endpoint: cli.endpoint,
        model: cli.model,
        secrets_file: cli.secrets_file,
        system_prompt: cli.system_prompt,
    };

    // No credential, no chat: stop before any prompt or request.
    let container = match Container::new(config) {
        Ok(container) => container,
        Err(e) if e.is_missing_credential() => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let router = Router::new(&container);
    let output = router.route(cli.command.unwrap_or(Commands::Chat)).await?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["storychat"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.secrets_file, DEFAULT_SECRETS_FILE);
    }

    #[test]
    fn ask_requires_a_prompt() {
        assert!(Cli::try_parse_from(["storychat", "ask"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["storychat", "ask", "hello", "there", "--mock", "--model", "m"])
                .unwrap();
        assert!(cli.mock);
        assert_eq!(cli.model.as_deref(), Some("m"));
        match cli.command {
            Some(Commands::Ask { prompt }) => assert_eq!(prompt, vec!["hello", "there"]),
            _ => panic!("expected ask"),
        }
    }
}
