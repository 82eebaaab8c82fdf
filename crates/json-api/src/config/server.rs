//! HTTP listener settings.

use clap::Args;

/// Where the Stockroom API listens.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind, `0.0.0.0` for every interface
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port for the JSON API
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, bracketing bare IPv6 hosts.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        server: ServerRuntimeConfig,
    }

    #[test]
    fn defaults_bind_every_interface_on_8080() -> TestResult {
        let cli = Cli::try_parse_from(["stockroom-json"])?;

        assert_eq!(cli.server.socket_addr(), "0.0.0.0:8080");

        Ok(())
    }

    #[test]
    fn ipv6_hosts_are_bracketed() -> TestResult {
        let cli = Cli::try_parse_from(["stockroom-json", "-H", "::1", "--port", "9090"])?;

        assert_eq!(cli.server.socket_addr(), "[::1]:9090");

        Ok(())
    }
}
