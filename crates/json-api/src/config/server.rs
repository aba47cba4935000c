//! Listener Config
//!
//! Where the checkout API accepts buyer and admin traffic.

use clap::Args;

/// Bind address for the checkout API listener.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to listen on (IPv4, IPv6 or hostname)
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port for checkout, payment and admin routes
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port` for the listener. IPv6 literals are bracketed.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        let host = self.host.trim();

        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ServerRuntimeConfig {
        ServerRuntimeConfig {
            host: host.to_string(),
            port: 8698,
        }
    }

    #[test]
    fn ipv4_and_hostnames_are_joined_with_port() {
        assert_eq!(config("127.0.0.1").socket_addr(), "127.0.0.1:8698");
        assert_eq!(config(" localhost ").socket_addr(), "localhost:8698");
    }

    #[test]
    fn ipv6_hosts_are_bracketed_once() {
        assert_eq!(config("::").socket_addr(), "[::]:8698");
        assert_eq!(config("[::1]").socket_addr(), "[::1]:8698");
    }
}
