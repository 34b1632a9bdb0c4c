//! cncsoc: composes CNC interface SoCs from board configurations.
//!
//! Provides `cncsoc check` to validate and compose a configuration,
//! `cncsoc build` to also write the generated artifacts, and `cncsoc csr` to
//! print the register map.

#![warn(missing_docs)]

mod build;
mod check;
mod csr;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// cncsoc: CNC interface SoC composer.
#[derive(Parser, Debug)]
#[command(name = "cncsoc", version, about = "CNC interface SoC composer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a board configuration and compose it.
    Check {
        /// Path to the board configuration.
        config: PathBuf,
    },
    /// Compose a board configuration and write the generated artifacts.
    Build(BuildArgs),
    /// Print the register map of a composed board.
    Csr(CsrArgs),
}

/// Arguments for the `cncsoc build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Path to the board configuration.
    pub config: PathBuf,

    /// Output directory (default: `build/<board>`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `cncsoc csr` subcommand.
#[derive(Parser, Debug)]
pub struct CsrArgs {
    /// Path to the board configuration.
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Register map output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned table.
    Text,
    /// JSON document.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print debug information.
    pub verbose: bool,
}

impl GlobalArgs {
    /// Log filter used when `RUST_LOG` is not set.
    fn default_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.default_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Check { ref config } => check::run(config, &global),
        Command::Build(ref args) => build::run(args, &global),
        Command::Csr(ref args) => csr::run(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["cncsoc", "check", "board.toml"]);
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("board.toml")),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_build_default_output() {
        let cli = Cli::parse_from(["cncsoc", "build", "board.toml"]);
        match cli.command {
            Command::Build(ref args) => {
                assert_eq!(args.config, PathBuf::from("board.toml"));
                assert!(args.output.is_none());
            }
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_with_output() {
        let cli = Cli::parse_from(["cncsoc", "build", "board.toml", "-o", "out"]);
        match cli.command {
            Command::Build(ref args) => assert_eq!(args.output, Some(PathBuf::from("out"))),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_csr_format() {
        let cli = Cli::parse_from(["cncsoc", "csr", "board.toml", "--format", "json"]);
        match cli.command {
            Command::Csr(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected Csr command"),
        }
        let cli = Cli::parse_from(["cncsoc", "csr", "board.toml"]);
        match cli.command {
            Command::Csr(ref args) => assert_eq!(args.format, ReportFormat::Text),
            _ => panic!("expected Csr command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["cncsoc", "--quiet", "check", "board.toml"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        let cli = Cli::parse_from(["cncsoc", "check", "board.toml", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn default_filters() {
        let g = |quiet, verbose| GlobalArgs { quiet, verbose }.default_filter();
        assert_eq!(g(false, false), "info");
        assert_eq!(g(true, false), "error");
        assert_eq!(g(false, true), "debug");
        assert_eq!(g(true, true), "error");
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["cncsoc"]).is_err());
    }
}
