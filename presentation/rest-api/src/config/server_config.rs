use std::env;

use super::error::{ConfigError, parse_number};

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: 8080)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            ip: env::var("SERVICE_IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_number("SERVICE_PORT", env::var("SERVICE_PORT").ok(), 8080)?,
        })
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_bind_address_from_ip_and_port() {
        let config = ServerConfig {
            ip: "0.0.0.0".to_string(),
            port: 3000,
        };

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }
}
