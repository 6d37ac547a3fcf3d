//! App state management - flow threads, event draining and image selection

use crate::graphql::GraphqlClient;
use crate::http_client::HttpNutritionService;
use nutrition_core::{bytes_to_data_url, decode_data_url, file_to_data_url, run_food_search, run_image_analyze, Result};

use eframe::egui;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use super::NutritionAnalyzerApp;

impl NutritionAnalyzerApp {
    pub(crate) fn start_analyze(&mut self) {
        let Some(job) = self.widget.begin_analyze() else {
            return;
        };
        tracing::info!("Analyzing image ({} g)", job.grams);

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        thread::spawn(move || run_image_analyze(service.as_ref(), job, &tx));
    }

    pub(crate) fn start_search(&mut self) {
        let Some(job) = self.widget.begin_search() else {
            return;
        };
        tracing::info!("Searching nutrition for {:?} ({} g)", job.food_name, job.grams);

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        thread::spawn(move || run_food_search(service.as_ref(), job, &tx));
    }

    /// Apply every event the flow threads have sent since the last frame
    pub(crate) fn check_progress(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.widget.apply(event);
        }
    }

    /// Load the file named in the path field
    pub(crate) fn load_image_path(&mut self, ctx: &egui::Context) {
        let path = self.image_path.trim().to_string();
        if path.is_empty() {
            return;
        }
        let result = file_to_data_url(Path::new(&path));
        self.finish_image_load(ctx, result);
    }

    /// Take the first file dropped onto the window, if any
    pub(crate) fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        let result = if let Some(bytes) = &file.bytes {
            let extension = Path::new(&file.name).extension().and_then(|ext| ext.to_str());
            bytes_to_data_url(bytes, extension)
        } else if let Some(path) = &file.path {
            self.image_path = path.display().to_string();
            file_to_data_url(path)
        } else {
            return;
        };
        self.finish_image_load(ctx, result);
    }

    fn finish_image_load(&mut self, ctx: &egui::Context, result: Result<String>) {
        match result {
            Ok(data_url) => self.set_image(ctx, data_url),
            Err(e) => {
                tracing::warn!("Could not load image: {}", e);
                self.widget.set_error(e.to_string());
            }
        }
    }

    pub(crate) fn set_image(&mut self, ctx: &egui::Context, data_url: String) {
        self.forget_preview(ctx);

        // Fresh URI per image so egui's loader cache never shows a stale one
        if let Some(decoded) = decode_data_url(&data_url) {
            self.preview_generation += 1;
            let uri = format!("bytes://selected_image/{}", self.preview_generation);
            ctx.include_bytes(uri.clone(), decoded.bytes);
            self.preview_uri = Some(uri);
        }
        self.widget.select_image(data_url);
    }

    pub(crate) fn remove_image(&mut self, ctx: &egui::Context) {
        self.forget_preview(ctx);
        self.widget.remove_image();
    }

    fn forget_preview(&mut self, ctx: &egui::Context) {
        if let Some(uri) = self.preview_uri.take() {
            ctx.forget_image(&uri);
        }
    }

    /// Persist the settings draft and rebuild the clients that depend on it
    pub(crate) fn apply_settings(&mut self) {
        let draft = self.settings_draft.clone();

        match HttpNutritionService::new(&draft) {
            Ok(service) => self.service = Arc::new(service),
            Err(e) => {
                self.widget.set_error(e.to_string());
                return;
            }
        }
        if draft.graphql_endpoint != self.config.graphql_endpoint {
            match GraphqlClient::new(draft.graphql_endpoint.clone()) {
                Ok(graphql) => self.graphql = graphql,
                Err(e) => tracing::warn!("Keeping previous GraphQL client: {}", e),
            }
        }

        if let Err(e) = draft.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
        tracing::info!("Using nutrition server {}", draft.server_url);
        self.config = draft;
    }

    pub(crate) fn reset_settings_draft(&mut self) {
        self.settings_draft = self.config.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use nutrition_core::{AnalyzerError, NutritionData, NutritionService};
    use std::time::{Duration, Instant};

    struct StubService;

    impl NutritionService for StubService {
        fn classify_image(&self, _image_data_url: &str) -> Result<String> {
            Ok("apple".to_string())
        }

        fn lookup_nutrition(&self, food_name: &str, grams: u32) -> Result<NutritionData> {
            if food_name.is_empty() {
                return Err(AnalyzerError::Nutrition);
            }
            Ok(NutritionData {
                food_name: food_name.to_string(),
                nf_calories: 0.52 * grams as f64,
                serving_weight_grams: grams as f64,
                ..Default::default()
            })
        }
    }

    fn test_app() -> NutritionAnalyzerApp {
        let graphql = GraphqlClient::new(Config::default().graphql_endpoint).unwrap();
        NutritionAnalyzerApp::new(Config::default(), Arc::new(StubService), graphql)
    }

    /// Drain events the way the frame loop does until no flow is running
    fn wait_idle(app: &mut NutritionAnalyzerApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.widget.is_busy() {
            assert!(Instant::now() < deadline, "flow never finished");
            thread::sleep(Duration::from_millis(5));
            app.check_progress();
        }
    }

    #[test]
    fn analyze_runs_on_a_thread_and_updates_widget() {
        let ctx = egui::Context::default();
        let mut app = test_app();
        app.set_image(&ctx, "data:image/png;base64,iVBORw0KGgo=".to_string());
        assert!(app.preview_uri.is_some());

        app.start_analyze();
        assert!(app.widget.is_analyzing());
        wait_idle(&mut app);

        assert_eq!(app.widget.detected_food, "apple");
        assert_eq!(app.widget.nutrition.as_ref().unwrap().nf_calories, 52.0);
        assert_eq!(app.widget.error(), None);
    }

    #[test]
    fn empty_search_surfaces_error() {
        let mut app = test_app();
        app.start_search();
        wait_idle(&mut app);

        assert_eq!(app.widget.error(), Some("Nutrition fetch failed"));
        assert!(app.widget.nutrition.is_none());
    }

    #[test]
    fn search_uses_edited_grams() {
        let mut app = test_app();
        app.widget.food_search = "apple".to_string();
        app.widget.edit_grams("200");
        app.start_search();
        wait_idle(&mut app);

        assert_eq!(app.widget.nutrition.as_ref().unwrap().serving_weight_grams, 200.0);
    }

    #[test]
    fn missing_file_sets_error_without_image() {
        let ctx = egui::Context::default();
        let mut app = test_app();
        app.image_path = "/definitely/not/here.jpg".to_string();
        app.load_image_path(&ctx);

        assert!(app.widget.image.is_none());
        assert!(app.widget.error().unwrap().starts_with("Failed to read file"));
    }

    #[test]
    fn removing_image_clears_preview_only() {
        let ctx = egui::Context::default();
        let mut app = test_app();
        app.set_image(&ctx, "data:image/png;base64,iVBORw0KGgo=".to_string());
        app.start_analyze();
        wait_idle(&mut app);

        app.remove_image(&ctx);
        assert!(app.preview_uri.is_none());
        assert!(app.widget.image.is_none());
        assert!(app.widget.nutrition.is_some());
    }
}
