//! API client for a remote estimator service

use anyhow::{Context, Result};
use estimator_lib::{CurveSummary, EstimateInput, EstimateResult};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// API client for the estimator HTTP service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let mut base_url = Url::parse(base_url).context("Invalid API URL")?;
        // join() replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }

    pub async fn estimate(&self, input: &EstimateInput) -> Result<EstimateResponse> {
        self.post("api/v1/estimate", input).await
    }

    pub async fn curves(&self) -> Result<Vec<CurveSummary>> {
        let response: CurvesResponse = self.get("api/v1/curves").await?;
        Ok(response.curves)
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub result: EstimateResult,
    #[serde(default)]
    pub clamped_fields: Vec<String>,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvesResponse {
    pub curves: Vec<CurveSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator_lib::estimate;
    use serde_json::json;

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/estimator/api/v1/curves")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "curves": [] }).to_string())
            .create_async()
            .await;

        let client = ApiClient::new(&format!("{}/estimator", server.url())).unwrap();
        let curves = client.curves().await.unwrap();

        mock.assert_async().await;
        assert!(curves.is_empty());
    }

    #[tokio::test]
    async fn test_estimate_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let input = EstimateInput::default();
        let body = json!({
            "result": estimate(&input),
            "clamped_fields": ["users"],
            "generated_at": "2024-01-01T00:00:00Z",
        });

        let mock = server
            .mock("POST", "/api/v1/estimate")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let response = client.estimate(&input).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.result.input, input);
        assert_eq!(response.result.services.len(), estimate(&input).services.len());
        assert_eq!(response.clamped_fields, vec!["users".to_string()]);
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/curves")
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.curves().await.unwrap_err();

        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_curves_parsed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/curves")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "curves": [{
                        "service": "frontend",
                        "factor": "engaged_users",
                        "feature": null,
                        "points": 8,
                        "min_value": 5.0,
                        "max_value": 20000.0
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let curves = client.curves().await.unwrap();

        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].service, "frontend");
        assert_eq!(curves[0].points, 8);
    }
}
