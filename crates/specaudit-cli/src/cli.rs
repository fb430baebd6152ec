//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Specaudit - validate audit catalog specification files
///
/// Checks every catalog document against the schema of its detected type,
/// then runs cross-document checks such as duplicate entry names.
#[derive(Parser, Debug)]
#[command(
    name = "specaudit",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SPECAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one specification file, a whole directory, or both
    Validate(ValidateArgs),

    /// Print the JSON Schema of a document type
    Schema(SchemaArgs),

    /// List the supported document types and their signature keys
    Types,

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["spec", "all"])
))]
pub struct ValidateArgs {
    /// Validate a single specification file
    #[arg(long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Validate every specification file in the specs directory
    #[arg(long)]
    pub all: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Directory holding the specification files [default: specs]
    #[arg(long, value_name = "DIR")]
    pub specs_dir: Option<PathBuf>,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Document type, e.g. design_patterns or security_vulnerabilities
    #[arg(value_name = "TYPE")]
    pub doc_type: String,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse the value used in configuration files
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_validate_requires_a_target() {
        assert!(Cli::try_parse_from(["specaudit", "validate"]).is_err());
        assert!(Cli::try_parse_from(["specaudit", "validate", "--strict"]).is_err());

        let cli = Cli::try_parse_from(["specaudit", "validate", "--all", "--spec", "a.yaml"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert!(args.all);
                assert_eq!(args.spec, Some(PathBuf::from("a.yaml")));
                assert!(!args.strict);
                assert!(args.specs_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::try_parse_from(["specaudit", "-vv", "types"]).unwrap();
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::from_config("YAML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_config("xml"), None);
    }
}
