//! CORS policy from configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use vectool_config::CorsConfig;

use crate::error::HttpTransportError;

const WILDCARD: &str = "*";

/// Builds the CORS layer, or `None` when no origins are configured.
pub fn cors_layer(config: &CorsConfig) -> Result<Option<CorsLayer>, HttpTransportError> {
    if !config.is_enabled() {
        return Ok(None);
    }

    let origins = if config.allowed_origins.iter().any(|o| o == WILDCARD) {
        AllowOrigin::any()
    } else {
        let list = config
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| HttpTransportError::InvalidCors {
                    setting: "origin",
                    value: o.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(list)
    };

    let methods = config
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(|_| {
                HttpTransportError::InvalidCors {
                    setting: "method",
                    value: m.clone(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let headers = if config.allowed_headers.iter().any(|h| h == WILDCARD) {
        AllowHeaders::any()
    } else {
        let list = config
            .allowed_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.as_bytes()).map_err(|_| HttpTransportError::InvalidCors {
                    setting: "header",
                    value: h.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowHeaders::list(list)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
            .max_age(Duration::from_secs(config.max_age_secs)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_origins_means_no_layer() {
        assert!(cors_layer(&CorsConfig::default()).expect("ok").is_none());
    }

    #[test]
    fn wildcard_and_explicit_origins_build() {
        let any = CorsConfig {
            allowed_origins: vec!["*".into()],
            ..CorsConfig::default()
        };
        assert!(cors_layer(&any).expect("ok").is_some());

        let listed = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            allowed_methods: vec!["get".into(), "POST".into()],
            ..CorsConfig::default()
        };
        assert!(cors_layer(&listed).expect("ok").is_some());
    }

    #[test]
    fn bad_header_is_rejected() {
        let bad = CorsConfig {
            allowed_origins: vec!["*".into()],
            allowed_headers: vec!["bad header".into()],
            ..CorsConfig::default()
        };
        assert!(matches!(
            cors_layer(&bad),
            Err(HttpTransportError::InvalidCors { setting: "header", .. })
        ));
    }
}
