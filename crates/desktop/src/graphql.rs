//! GraphQL client for the local backend.
//!
//! Built once in `main` and handed to the app; the analyzer itself does not
//! query it yet.

use std::collections::HashMap;
use std::sync::Mutex;

use nutrition_core::{AnalyzerError, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

pub struct GraphqlClient {
    endpoint: String,
    http: Client,
    /// Successful `data` payloads keyed by query + variables
    cache: Mutex<HashMap<String, Value>>,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| AnalyzerError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
            cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query and deserialize its `data`, serving repeats from the cache
    #[allow(dead_code)]
    pub fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let key = format!("{}\n{}", query, variables);
        if let Some(data) = self.cached(&key) {
            tracing::debug!("GraphQL cache hit");
            return decode(data);
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables: &variables })
            .send()
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::GraphQL(format!("Request failed with status {}", status)));
        }

        let body: GraphqlResponse = response
            .json()
            .map_err(|e| AnalyzerError::InvalidData(format!("Failed to parse response: {}", e)))?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(AnalyzerError::GraphQL(messages.join("; ")));
        }

        let data = body
            .data
            .ok_or_else(|| AnalyzerError::GraphQL("Response has no data".to_string()))?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, data.clone());
        }
        decode(data)
    }

    #[allow(dead_code)]
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }

    fn cached(&self, key: &str) -> Option<Value> {
        self.cache.lock().ok()?.get(key).cloned()
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| AnalyzerError::InvalidData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Foods {
        foods: Vec<String>,
    }

    const FOODS_QUERY: &str = "query Foods($limit: Int) { foods(limit: $limit) }";

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_returns_data_and_caches_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_json(json!({ "query": FOODS_QUERY, "variables": { "limit": 2 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "foods": ["apple", "rice"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/graphql", server.uri());
        let (first, second) = tokio::task::spawn_blocking(move || {
            let client = GraphqlClient::new(endpoint).unwrap();
            let first: Foods = client.query(FOODS_QUERY, json!({ "limit": 2 })).unwrap();
            let second: Foods = client.query(FOODS_QUERY, json!({ "limit": 2 })).unwrap();
            (first, second)
        })
        .await
        .unwrap();

        assert_eq!(first.foods, vec!["apple", "rice"]);
        assert_eq!(first, second);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_errors_array_is_graphql_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Cannot query field \"drinks\"" }]
            })))
            .mount(&server)
            .await;

        let endpoint = format!("{}/graphql", server.uri());
        let result = tokio::task::spawn_blocking(move || {
            GraphqlClient::new(endpoint).unwrap().query::<Value>("{ drinks }", json!({}))
        })
        .await
        .unwrap();

        match result {
            Err(AnalyzerError::GraphQL(message)) => assert!(message.contains("drinks")),
            other => panic!("expected GraphQL error, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_clear_cache_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "foods": [] } })))
            .expect(2)
            .mount(&server)
            .await;

        let endpoint = format!("{}/graphql", server.uri());
        tokio::task::spawn_blocking(move || {
            let client = GraphqlClient::new(endpoint).unwrap();
            let _: Foods = client.query(FOODS_QUERY, json!({})).unwrap();
            client.clear_cache();
            let _: Foods = client.query(FOODS_QUERY, json!({})).unwrap();
        })
        .await
        .unwrap();
    }
}
