use clap::Parser;

#[derive(Debug, Parser)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Path of the configuration file
    #[clap(long, short)]
    pub config: camino::Utf8PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Play the logo and the ticker messages until interrupted
    Run,

    /// Check the configuration file and the sprites it points to
    VerifyConfig,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::Parser;

    use super::Cli;
    use super::Command;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["synergy-sign", "-c", "sign.toml", "run"]).unwrap();
        assert_eq!(cli.config, "sign.toml");
        assert!(matches!(cli.command, Command::Run));
    }

    #[test]
    fn test_parse_verify_config() {
        let cli =
            Cli::try_parse_from(["synergy-sign", "--config", "sign.toml", "verify-config"]).unwrap();
        assert!(matches!(cli.command, Command::VerifyConfig));
    }
}
