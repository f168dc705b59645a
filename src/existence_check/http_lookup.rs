use super::config::{ExistenceCheckConfig, ExistenceCheckConfigError};
use super::lookup::{CuitExistenceLookup, LookupError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const CUIT_PARAM: &str = "cuit";
const EXCLUDE_PARAM: &str = "exclude";

/// The backend answers either with a bare JSON boolean or with `{"exists": bool}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExistsResponse {
    Flag(bool),
    Object { exists: bool },
}

impl ExistsResponse {
    fn exists(&self) -> bool {
        match self {
            ExistsResponse::Flag(exists) | ExistsResponse::Object { exists } => *exists,
        }
    }
}

pub struct HttpExistenceLookup {
    client: Client,
    config: ExistenceCheckConfig,
}

impl HttpExistenceLookup {
    pub fn new(config: ExistenceCheckConfig) -> Result<Self, ExistenceCheckConfigError> {
        config.validate()?;
        Ok(HttpExistenceLookup {
            client: Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &ExistenceCheckConfig {
        &self.config
    }
}

#[async_trait]
impl CuitExistenceLookup for HttpExistenceLookup {
    async fn exists(&self, cuit: &str, exclude: Option<&str>) -> Result<bool, LookupError> {
        let mut query = vec![(CUIT_PARAM, cuit)];
        if let Some(exclude) = exclude {
            query.push((EXCLUDE_PARAM, exclude));
        }

        let mut request_builder = self
            .client
            .get(&self.config.endpoint)
            .timeout(self.config.timeout)
            .query(&query);
        for (key, value) in &self.config.request_headers {
            request_builder = request_builder.header(key, value);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        if !self.config.is_valid_status(status) {
            return Err(LookupError::UnexpectedStatus(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        serde_json::from_str::<ExistsResponse>(&body)
            .map(|response| response.exists())
            .map_err(|err| LookupError::InvalidBody(err.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::existence_check::config::HttpStatusCodeRange;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn lookup_for(server: &MockServer) -> HttpExistenceLookup {
        let config = ExistenceCheckConfig::default().with_endpoint(server.url("/cuit-exists"));
        HttpExistenceLookup::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_existing_cuit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/cuit-exists")
                    .query_param("cuit", "20305361160");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("true");
            })
            .await;

        let lookup = lookup_for(&server);
        assert_eq!(lookup.exists("20305361160", None).await, Ok(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exclusion_is_sent_and_object_body_is_accepted() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/cuit-exists")
                    .query_param("cuit", "20305361160")
                    .query_param("exclude", "27234567891");
                then.status(200).body(r#"{"exists": false}"#);
            })
            .await;

        let lookup = lookup_for(&server);
        assert_eq!(
            lookup.exists("20305361160", Some("27234567891")).await,
            Ok(false)
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_headers_are_sent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/cuit-exists")
                    .header("authorization", "Bearer token");
                then.status(200).body("false");
            })
            .await;

        let config = ExistenceCheckConfig::default()
            .with_endpoint(server.url("/cuit-exists"))
            .with_request_headers(BTreeMap::from([(
                "authorization".to_string(),
                "Bearer token".to_string(),
            )]));
        let lookup = HttpExistenceLookup::new(config).unwrap();
        assert_eq!(lookup.exists("20305361160", None).await, Ok(false));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/cuit-exists");
                then.status(503);
            })
            .await;

        let lookup = lookup_for(&server);
        assert_eq!(
            lookup.exists("20305361160", None).await,
            Err(LookupError::UnexpectedStatus(503))
        );
    }

    #[tokio::test]
    async fn test_custom_valid_status_range() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/cuit-exists");
                then.status(409).body("true");
            })
            .await;

        let config = ExistenceCheckConfig::default()
            .with_endpoint(server.url("/cuit-exists"))
            .with_valid_http_status_code(vec![
                HttpStatusCodeRange {
                    start: 200,
                    end: 300,
                },
                HttpStatusCodeRange {
                    start: 409,
                    end: 410,
                },
            ]);
        let lookup = HttpExistenceLookup::new(config).unwrap();
        assert_eq!(lookup.exists("20305361160", None).await, Ok(true));
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/cuit-exists");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let lookup = lookup_for(&server);
        assert!(matches!(
            lookup.exists("20305361160", None).await,
            Err(LookupError::InvalidBody(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/cuit-exists");
                then.status(200).body("true").delay(Duration::from_secs(2));
            })
            .await;

        let config = ExistenceCheckConfig::default()
            .with_endpoint(server.url("/cuit-exists"))
            .with_timeout(Duration::from_millis(100));
        let lookup = HttpExistenceLookup::new(config).unwrap();
        assert!(matches!(
            lookup.exists("20305361160", None).await,
            Err(LookupError::Transport(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ExistenceCheckConfig::default().with_endpoint(String::new());
        assert!(matches!(
            HttpExistenceLookup::new(config),
            Err(ExistenceCheckConfigError::EmptyEndpoint)
        ));
    }
}
