use axum::http::{HeaderValue, Method};
use std::env;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Cross-origin callers allowed to use the API. Empty means same-origin only.
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_raw = env::var("SHOWBILL_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %bind_raw, "invalid SHOWBILL_BIND, using {DEFAULT_BIND}");
            Self::default().bind
        });

        Self {
            bind,
            cors_origins: parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default()),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any);

        if self.cors_origins.is_empty() {
            tracing::warn!("CORS_ORIGINS not set, cross-origin requests are refused");
            layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            tracing::info!("CORS allowed origins: {:?}", self.cors_origins);
            layer.allow_origin(self.cors_origins.clone())
        }
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:3000, https://showbill.example.com,,");
        assert_eq!(
            origins,
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://showbill.example.com"),
            ]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_default_bind() {
        assert_eq!(ServerConfig::default().bind.to_string(), DEFAULT_BIND);
    }
}
