//! Main application module

mod panels;
mod state;

use crate::config::Config;
use crate::graphql::GraphqlClient;
use nutrition_core::{FlowEvent, NutritionService, WidgetState};

use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

pub struct NutritionAnalyzerApp {
    pub(crate) config: Config,
    pub(crate) widget: WidgetState,
    pub(crate) service: Arc<dyn NutritionService>,
    // Owned here so its lifetime is the app's; nothing in the widget queries it
    pub(crate) graphql: GraphqlClient,
    // Every flow thread gets a clone of the sender; events apply in completion order
    pub(crate) events_tx: Sender<FlowEvent>,
    pub(crate) events_rx: Receiver<FlowEvent>,
    // Path typed into the "Image file" field
    pub(crate) image_path: String,
    // egui image URI for the selected photo's preview
    pub(crate) preview_uri: Option<String>,
    pub(crate) preview_generation: u64,
    // Settings window
    pub(crate) show_settings: bool,
    pub(crate) settings_draft: Config,
}

impl NutritionAnalyzerApp {
    pub fn new(config: Config, service: Arc<dyn NutritionService>, graphql: GraphqlClient) -> Self {
        let (events_tx, events_rx) = channel();
        let show_settings = !config.is_valid();

        Self {
            settings_draft: config.clone(),
            config,
            widget: WidgetState::new(),
            service,
            graphql,
            events_tx,
            events_rx,
            image_path: String::new(),
            preview_uri: None,
            preview_generation: 0,
            show_settings,
        }
    }
}

impl eframe::App for NutritionAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_progress();
        self.handle_dropped_files(ctx);

        // Keep polling the channel while a flow is in flight
        if self.widget.is_busy() {
            ctx.request_repaint();
        }

        self.render_top_panel(ctx);
        self.render_main_panel(ctx);
    }
}
