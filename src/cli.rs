//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "coilmq")]
#[command(version, about = "Lightweight STOMP message broker", long_about = None)]
pub struct Cli {
    /// Read configuration from FILE. (CLI options override config file.)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Listen on specified address (default 0.0.0.0)
    #[arg(short = 'b', long = "host", value_name = "ADDR")]
    pub host: Option<String>,

    /// Listen on specified port (default 61613)
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Load configuration and assemble the server, then exit without listening
    #[arg(long)]
    pub check: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// List registered component identifiers and exit
    #[arg(long)]
    pub list_components: bool,
}

impl Cli {
    /// Values given on the command line; omitted flags stay `None`.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen_addr: self.host.clone(),
            listen_port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_no_overrides() {
        let cli = Cli::try_parse_from(["coilmq"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.overrides().is_empty());
    }

    #[test]
    fn short_and_long_flags() {
        let cli = Cli::try_parse_from(["coilmq", "-c", "broker.toml", "-b", "127.0.0.1", "-p", "5000"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("broker.toml")));
        assert_eq!(
            cli.overrides(),
            ConfigOverrides {
                listen_addr: Some("127.0.0.1".into()),
                listen_port: Some(5000),
            }
        );

        let cli = Cli::try_parse_from(["coilmq", "--host", "::1", "--port", "61614"]).unwrap();
        assert_eq!(cli.overrides().listen_addr.as_deref(), Some("::1"));
        assert_eq!(cli.overrides().listen_port, Some(61614));
    }

    #[test]
    fn port_must_be_an_integer() {
        assert!(Cli::try_parse_from(["coilmq", "--port", "stomp"]).is_err());
        assert!(Cli::try_parse_from(["coilmq", "--port", "70000"]).is_err());
    }
}
