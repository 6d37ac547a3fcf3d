//! HTTP client for the classification and nutrition lookup services
//!
//! Uses reqwest's blocking client; calls run on the flow threads, never the UI thread.

use nutrition_core::{
    AnalyzerError, ClassifyRequest, ClassifyResponse, NutritionData, NutritionRequest,
    NutritionResponse, NutritionService, Result,
};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;

pub struct HttpNutritionService {
    client: Client,
    classify_url: String,
    nutrition_url: String,
}

impl HttpNutritionService {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AnalyzerError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            classify_url: config.classify_url(),
            nutrition_url: config.nutrition_url(),
        })
    }

    /// POST `body` as JSON; any non-2xx status becomes `on_status`
    fn post_json<B, R>(&self, url: &str, body: &B, on_status: AnalyzerError) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!("POST {} returned {}", url, response.status());
            return Err(on_status);
        }

        response
            .json::<R>()
            .map_err(|e| AnalyzerError::InvalidData(format!("Failed to parse response: {}", e)))
    }
}

impl NutritionService for HttpNutritionService {
    fn classify_image(&self, image_data_url: &str) -> Result<String> {
        let body = ClassifyRequest { image_base64: image_data_url };
        let response: ClassifyResponse =
            self.post_json(&self.classify_url, &body, AnalyzerError::Classification)?;
        Ok(response.label)
    }

    fn lookup_nutrition(&self, food_name: &str, grams: u32) -> Result<NutritionData> {
        let body = NutritionRequest { food_name, grams };
        let response: NutritionResponse =
            self.post_json(&self.nutrition_url, &body, AnalyzerError::Nutrition)?;
        Ok(response.nutrition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        Config {
            server_url: server.uri(),
            ..Config::default()
        }
    }

    /// The blocking client must be built, used and dropped off the async runtime
    async fn blocking<T, F>(work: F) -> T
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        tokio::task::spawn_blocking(work).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_classify_posts_image_and_returns_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/classify-image"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "imageBase64": "data:image/png;base64,AA==" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "apple" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let label = blocking(move || {
            HttpNutritionService::new(&config)?.classify_image("data:image/png;base64,AA==")
        })
        .await
        .unwrap();

        assert_eq!(label, "apple");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_lookup_posts_food_and_grams() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/nutrition"))
            .and(body_json(json!({ "foodName": "apple", "grams": 150 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nutrition": {
                    "food_name": "apple",
                    "nf_calories": 78,
                    "nf_protein": 0.39,
                    "nf_total_fat": 0.26,
                    "nf_total_carbohydrate": 20.7,
                    "serving_qty": 150,
                    "serving_unit": "g",
                    "serving_weight_grams": 150
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let nutrition = blocking(move || HttpNutritionService::new(&config)?.lookup_nutrition("apple", 150))
            .await
            .unwrap();

        assert_eq!(nutrition.food_name, "apple");
        assert_eq!(nutrition.nf_calories, 78.0);
        assert_eq!(nutrition.serving_weight_grams, 150.0);
        assert_eq!(nutrition.calories_display(), "78 kcal");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_2xx_maps_to_endpoint_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/classify-image"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/nutrition"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (classified, looked_up) = blocking(move || {
            let service = HttpNutritionService::new(&config).unwrap();
            (
                service.classify_image("data:image/png;base64,AA=="),
                service.lookup_nutrition("unobtainium", 100),
            )
        })
        .await;

        assert!(matches!(classified, Err(AnalyzerError::Classification)));
        assert!(matches!(looked_up, Err(AnalyzerError::Nutrition)));
        assert_eq!(looked_up.unwrap_err().to_string(), "Nutrition fetch failed");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_malformed_success_body_is_invalid_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/classify-image"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "labels": ["apple"] })))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let result = blocking(move || HttpNutritionService::new(&config)?.classify_image("data:,"))
            .await;

        assert!(matches!(result, Err(AnalyzerError::InvalidData(_))));
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        let config = Config {
            // Port 9 (discard) is closed on test machines
            server_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let service = HttpNutritionService::new(&config).unwrap();

        assert!(matches!(service.lookup_nutrition("apple", 100), Err(AnalyzerError::Network(_))));
    }
}
