//! Parses command-line arguments for the ShadowChain node.

use std::path::PathBuf;

use clap::{crate_version, Parser};

#[derive(Debug, Parser)]
#[clap(
    name = "shadow-node",
    about = "The ShadowChain node with its privacy bridge",
    version = crate_version!()
)]
pub(crate) struct Cli {
    #[clap(
        long,
        short = 'p',
        help = "The file containing the chain params, built-in defaults are used if omitted"
    )]
    pub params: Option<PathBuf>,

    #[clap(
        long,
        short = 'c',
        help = "The file containing the configuration for the node, built-in defaults are used if omitted"
    )]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_paths() {
        let cli = Cli::parse_from(["shadow-node", "-c", "node.toml", "--params", "params.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("node.toml")));
        assert_eq!(cli.params, Some(PathBuf::from("params.toml")));

        let cli = Cli::parse_from(["shadow-node"]);
        assert!(cli.config.is_none());
        assert!(cli.params.is_none());
    }
}
