//! HTTP client for the hazard API point endpoints
//!
//! One GET round trip per call, query-parameter encoded, JSON reply. There is
//! deliberately no retry or backoff here: a failed call fails the run.

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{HazardQuery, PointResponse, Product};
use std::sync::Arc;
use std::time::Instant;

/// Client for the hazard API
///
/// Holds a connection pool, the client configuration and the token provider.
/// Cloning is cheap; the underlying `reqwest::Client` is already shared.
#[derive(Clone)]
pub struct HazardClient {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl HazardClient {
    /// Create a client from a configuration and a token provider
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Query DeepCyc return-period windspeeds for a batch of points
    ///
    /// Convenience wrapper around [`HazardClient::point_query`].
    pub async fn deepcyc_pointep(
        &self,
        query: &HazardQuery,
        lats: &[f64],
        lons: &[f64],
    ) -> Result<PointResponse> {
        self.point_query(Product::DeepCyc, query, lats, lons).await
    }

    /// Query Metryc per-storm windspeeds for a batch of points
    ///
    /// Convenience wrapper around [`HazardClient::point_query`].
    pub async fn metryc_point(
        &self,
        query: &HazardQuery,
        lats: &[f64],
        lons: &[f64],
    ) -> Result<PointResponse> {
        self.point_query(Product::Metryc, query, lats, lons).await
    }

    /// Issue one point query for the given product
    ///
    /// Encodes the coordinates as repeated `lats`/`lons` query parameters and
    /// attaches the current access token. The `years` parameter is only sent
    /// for DeepCyc queries that specify a return period.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with the response body for any non-2xx status,
    /// [`Error::Auth`] when no token is available, or [`Error::Network`] for
    /// transport failures.
    pub async fn point_query(
        &self,
        product: Product,
        query: &HazardQuery,
        lats: &[f64],
        lons: &[f64],
    ) -> Result<PointResponse> {
        let url = format!("{}/{}", self.config.base_url, product.endpoint_path());
        let token = self.tokens.access_token().await?;

        let mut params: Vec<(&str, String)> = Vec::with_capacity(lats.len() * 2 + 5);
        params.push(("access_token", token));
        for lat in lats {
            params.push(("lats", lat.to_string()));
        }
        for lon in lons {
            params.push(("lons", lon.to_string()));
        }
        params.push((
            "terrain_correction",
            query.terrain_correction.code().to_string(),
        ));
        params.push((
            "windspeed_averaging_period",
            query.windspeed_averaging_period.clone(),
        ));
        if product == Product::DeepCyc {
            if let Some(years) = query.rp_year {
                params.push(("years", years.to_string()));
            }
        }
        if let Some(tag) = &query.tag {
            params.push(("tag", tag.clone()));
        }

        let started = Instant::now();
        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data = response.json::<PointResponse>().await?;
        tracing::debug!(
            endpoint = product.endpoint_path(),
            points = lats.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "point query completed"
        );

        Ok(data)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> HazardClient {
        HazardClient::new(
            ClientConfig::with_base_url(base_url),
            Arc::new(StaticTokenProvider::new("test-token")),
        )
        .unwrap()
    }

    fn empty_body() -> serde_json::Value {
        serde_json::json!({"header": {}, "features": []})
    }

    #[tokio::test]
    async fn sends_token_and_coordinates_as_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metryc/point"))
            .and(query_param("access_token", "test-token"))
            .and(query_param("lats", "29.95747"))
            .and(query_param("lons", "-90.06295"))
            .and(query_param("terrain_correction", "FT_GUST"))
            .and(query_param("windspeed_averaging_period", "3-seconds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let query = HazardQuery::default();
        client
            .metryc_point(&query, &[29.95747], &[-90.06295])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deepcyc_query_includes_years_when_rp_year_is_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deepcyc/pointep"))
            .and(query_param("years", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let query = HazardQuery {
            rp_year: Some(100),
            ..HazardQuery::default()
        };
        client.deepcyc_pointep(&query, &[27.11], &[-82.46]).await.unwrap();
    }

    #[tokio::test]
    async fn tag_is_forwarded_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metryc/point"))
            .and(query_param("tag", "Jackson_Square"))
            .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let query = HazardQuery {
            tag: Some("Jackson_Square".to_string()),
            ..HazardQuery::default()
        };
        client
            .metryc_point(&query, &[29.95747], &[-90.06295])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_becomes_api_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metryc/point"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("{\"detail\": \"storm surge\"}"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .metryc_point(&HazardQuery::default(), &[1.0], &[2.0])
            .await
            .unwrap_err();

        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("storm surge"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn auth_failure_short_circuits_before_any_request() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404 and still be observed.
        let client = HazardClient::new(
            ClientConfig::with_base_url(server.uri()),
            Arc::new(crate::auth::EnvTokenProvider::new(
                "HAZARD_DL_CLIENT_TEST_UNSET",
            )),
        )
        .unwrap();

        let err = client
            .metryc_point(&HazardQuery::default(), &[1.0], &[2.0])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
