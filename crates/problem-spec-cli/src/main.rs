//! `problem-spec`: turn a saved judge page into a problem specification.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::StrategyChoice;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "problem-spec", version, about = "Extract problem specifications from judge pages")]
struct Cli {
    /// Log extraction details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a problem from a saved page and print it as JSON.
    Parse {
        /// Address the page was fetched from; selects the judge.
        #[arg(long)]
        url: String,

        /// Saved page to read. Reads stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Judge configuration file replacing the built-in set.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Restrict extraction to one strategy.
        #[arg(long, value_enum, default_value_t = StrategyChoice::Auto)]
        strategy: StrategyChoice,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },

    /// List configured judges, their strategies and URL patterns.
    Judges {
        /// Judge configuration file replacing the built-in set.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose {
        "problem_spec=debug"
    } else {
        "problem_spec=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(default.parse()?))
        .init();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Parse {
            url,
            input,
            config,
            strategy,
            compact,
        } => commands::run_parse(&url, input, config, strategy, compact),
        Command::Judges { config } => commands::run_judges(config),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&output::Styled::new(), &e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "problem-spec",
            "parse",
            "--url",
            "https://deeplearning.org.cn/problem/P1001",
            "--input",
            "page.html",
            "--strategy",
            "payload",
            "--compact",
        ])
        .unwrap();

        match cli.command {
            Command::Parse {
                url,
                input,
                strategy,
                compact,
                config,
            } => {
                assert_eq!(url, "https://deeplearning.org.cn/problem/P1001");
                assert_eq!(input, Some(PathBuf::from("page.html")));
                assert_eq!(strategy, StrategyChoice::Payload);
                assert!(compact);
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_strategy_defaults_to_auto() {
        let cli = Cli::try_parse_from(["problem-spec", "-v", "parse", "--url", "u"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Parse {
                strategy: StrategyChoice::Auto,
                ..
            }
        ));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["problem-spec", "parse"]).is_err());
    }

    #[test]
    fn test_judges_subcommand() {
        let cli = Cli::try_parse_from(["problem-spec", "judges", "--config", "j.json"]).unwrap();
        assert!(matches!(cli.command, Command::Judges { config: Some(_) }));
    }
}
