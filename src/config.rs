use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Scheme and host of the recognition service, e.g. "http://od.example.com"
    pub host: String,
    pub port: u16,
}

impl ClientConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Build a config directly from a host and port, bypassing the file loader.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            server: ServerConfig {
                host: host.into(),
                port,
            },
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
