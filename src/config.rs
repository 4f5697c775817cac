use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Base URL of the processing backend. Not validated; an empty value only
    /// fails once a request tries to reach it.
    pub backend_url: String,
    pub oembed_endpoint: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let backend_url = env::var("BACKEND_URL").unwrap_or_default();
        let oembed_endpoint = env::var("OEMBED_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_OEMBED_ENDPOINT.to_string());

        // Load server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let server_addr = parse_server_addr(&host, &port)?;

        Ok(Config::new(server_addr, backend_url, oembed_endpoint))
    }

    pub fn new(
        server_addr: SocketAddr,
        backend_url: impl Into<String>,
        oembed_endpoint: impl Into<String>,
    ) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();

        Config {
            server_addr,
            backend_url,
            oembed_endpoint: oembed_endpoint.into(),
        }
    }

    pub fn summarize_endpoint(&self) -> String {
        format!("{}/summarize", self.backend_url)
    }
}

fn parse_server_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host)
        .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

    Ok(SocketAddr::new(ip, port))
}
