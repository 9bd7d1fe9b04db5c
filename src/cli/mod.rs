pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// Get the build environment from a settings yaml file.
#[derive(Parser, Debug)]
#[command(name = "buildenv", version, about, long_about = None)]
pub struct Cli {
    /// Environment (qa, dev, stage, prod, etc)
    #[arg(short = 'e', long = "environment", env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Datacenter to resolve datacenter-specific variables for
    #[arg(short = 'd', long = "datacenter", env = "DATACENTER", default_value = "")]
    pub datacenter: String,

    /// Variables YAML file
    #[arg(
        short = 'f',
        long = "variables_file",
        env = "VARIABLES_FILE",
        default_value = "variables.yml"
    )]
    pub variables_file: PathBuf,

    /// Attempt a system mlock so secret material is not written to swap
    #[arg(short = 'm', long = "mlock_enabled")]
    pub mlock_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::parse_from(["buildenv", "-e", "dev", "-d", "us_east", "-f", "vars.yml"]);

        assert_eq!(cli.environment.as_deref(), Some("dev"));
        assert_eq!(cli.datacenter, "us_east");
        assert_eq!(cli.variables_file, PathBuf::from("vars.yml"));
        assert!(!cli.mlock_enabled);
    }

    #[test]
    fn parses_long_flags_with_underscores() {
        let cli = Cli::parse_from([
            "buildenv",
            "--environment",
            "prod",
            "--variables_file",
            "other.yml",
            "--mlock_enabled",
        ]);

        assert_eq!(cli.environment.as_deref(), Some("prod"));
        assert_eq!(cli.variables_file, PathBuf::from("other.yml"));
        assert!(cli.mlock_enabled);
    }

    #[test]
    fn defaults_when_flags_absent() {
        let cli = Cli::parse_from(["buildenv"]);

        assert_eq!(cli.datacenter, "");
        assert_eq!(cli.variables_file, PathBuf::from("variables.yml"));
    }
}
