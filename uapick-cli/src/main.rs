//! entrypoint for uapick-cli

use clap::{Parser, Subcommand};
use std::process::ExitCode;

pub mod cmd;
use self::cmd::{list, pick, stress};

pub mod config;
pub mod trace;

#[derive(Debug, Parser)]
#[command(name = "uapick")]
#[command(bin_name = "uapick")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: config::GlobalArgs,

    #[command(subcommand)]
    cmds: CliCommands,
}

#[derive(Debug, Subcommand)]
enum CliCommands {
    Pick(pick::CliCommandPick),
    List(list::CliCommandList),
    Stress(stress::CliCommandStress),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = trace::init_tracing(cli.global.log_level.into(), cli.global.log_json) {
        eprintln!("🚩 exit with error: {err}");
        return ExitCode::FAILURE;
    }

    let catalogs = &cli.global.catalogs;
    if let Err(err) = match cli.cmds {
        CliCommands::Pick(cfg) => pick::run(cfg, catalogs).await,
        CliCommands::List(cfg) => list::run(cfg, catalogs).await,
        CliCommands::Stress(cfg) => stress::run(cfg, catalogs).await,
    } {
        tracing::debug!("command failed: {err:?}");
        eprintln!("🚩 exit with error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pick_defaults() {
        let cli = Cli::try_parse_from(["uapick", "pick"]).unwrap();
        assert_eq!(config::LogLevel::Info, cli.global.log_level);
        assert!(!cli.global.log_json);
        assert!(matches!(cli.cmds, CliCommands::Pick(_)));
    }

    #[test]
    fn zero_max_requests_is_rejected() {
        assert!(Cli::try_parse_from(["uapick", "pick", "--max-requests", "0"]).is_err());
        assert!(Cli::try_parse_from(["uapick", "stress", "--window-secs", "0"]).is_err());
    }

    #[test]
    fn global_args_after_subcommand() {
        let cli = Cli::try_parse_from([
            "uapick",
            "list",
            "--device",
            "Mobile",
            "--log-level",
            "DEBUG",
            "--desktop-file",
            "desktop.json",
        ])
        .unwrap();
        assert_eq!(config::LogLevel::Debug, cli.global.log_level);
        assert_eq!(
            Some(std::path::PathBuf::from("desktop.json")),
            cli.global.catalogs.desktop_file
        );
    }

    #[test]
    fn full_conflicts_with_json() {
        assert!(Cli::try_parse_from(["uapick", "pick", "--full", "--json"]).is_err());
    }
}
