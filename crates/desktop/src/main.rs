// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod graphql;
mod http_client;

use app::NutritionAnalyzerApp;
use config::Config;
use eframe::egui;
use graphql::GraphqlClient;
use http_client::HttpNutritionService;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    tracing::info!("Nutrition server: {}", config.server_url);

    let service = match HttpNutritionService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    let graphql = match GraphqlClient::new(config.graphql_endpoint.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 800.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Food Nutrition Analyzer",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(NutritionAnalyzerApp::new(config, Arc::new(service), graphql)))
        }),
    )
}
