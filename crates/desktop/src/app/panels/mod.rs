//! egui panels for the analyzer window

mod results;
mod search;
mod top;
mod upload;

use eframe::egui;

use crate::app::NutritionAnalyzerApp;

/// Accent used for primary buttons and the result card heading
pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(147, 51, 234);

impl NutritionAnalyzerApp {
    pub(crate) fn render_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Food Nutrition Analyzer");
                    ui.label(
                        egui::RichText::new("Analyze food nutrition using image upload or text search.")
                            .color(egui::Color32::GRAY),
                    );
                });

                ui.add_space(16.0);
                self.render_upload_section(ui);

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);
                self.render_search_section(ui);

                ui.add_space(12.0);
                self.render_error(ui);
                self.render_results(ui);
            });
        });
    }
}
