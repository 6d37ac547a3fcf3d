//! Top toolbar panel - status and the settings window

use eframe::egui;
use egui_phosphor::regular;

use crate::app::NutritionAnalyzerApp;

impl NutritionAnalyzerApp {
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(regular::FORK_KNIFE).size(18.0));
                ui.label(egui::RichText::new(&self.config.server_url).color(egui::Color32::GRAY));

                if self.widget.is_busy() {
                    ui.separator();
                    ui.spinner();
                    let status = match (self.widget.is_analyzing(), self.widget.is_searching()) {
                        (true, true) => "Analyzing image and searching...",
                        (true, false) => "Analyzing image...",
                        _ => "Searching...",
                    };
                    ui.label(status);
                }

                // Settings cog button on the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(regular::GEAR).on_hover_text("Settings").clicked() {
                        self.reset_settings_draft();
                        self.show_settings = true;
                    }
                });
            });
        });

        self.render_settings_window(ctx);
    }

    fn render_settings_window(&mut self, ctx: &egui::Context) {
        let mut show_settings = self.show_settings;
        let mut save_clicked = false;

        egui::Window::new(format!("{} Settings", regular::GEAR))
            .open(&mut show_settings)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.heading("Services");
                ui.add_space(8.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Server URL:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_draft.server_url)
                                .desired_width(260.0)
                                .hint_text("http://localhost:3000"),
                        );
                        ui.end_row();

                        ui.label("Classify path:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_draft.classify_path)
                                .desired_width(260.0),
                        );
                        ui.end_row();

                        ui.label("Nutrition path:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_draft.nutrition_path)
                                .desired_width(260.0),
                        );
                        ui.end_row();

                        ui.label("GraphQL endpoint:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.settings_draft.graphql_endpoint)
                                .desired_width(260.0),
                        );
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!(
                        "GraphQL client currently points at {}",
                        self.graphql.endpoint()
                    ))
                    .color(egui::Color32::GRAY)
                    .small(),
                );

                ui.add_space(12.0);

                // Validation status
                if !self.settings_draft.is_valid() {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("{} Server URL and both paths are required", regular::WARNING),
                    );
                } else {
                    ui.colored_label(egui::Color32::GREEN, format!("{} Configuration valid", regular::CHECK));
                }

                ui.add_space(8.0);
                if ui
                    .add_enabled(self.settings_draft.is_valid(), egui::Button::new("Save"))
                    .clicked()
                {
                    save_clicked = true;
                }
            });

        if save_clicked {
            self.apply_settings();
            show_settings = false;
        }
        self.show_settings = show_settings;
    }
}
