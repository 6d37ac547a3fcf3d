//! Manual food search

use eframe::egui;
use egui_phosphor::regular;

use super::ACCENT;
use crate::app::NutritionAnalyzerApp;

impl NutritionAnalyzerApp {
    pub(crate) fn render_search_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Search food manually:").strong());

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.widget.food_search)
                    .desired_width(ui.available_width() - 48.0)
                    .hint_text("Search food..."),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let button = egui::Button::new(
                egui::RichText::new(regular::MAGNIFYING_GLASS).color(egui::Color32::WHITE),
            )
            .fill(ACCENT);
            let searching = self.widget.is_searching();
            if ui.add_enabled(!searching, button).clicked() || (submitted && !searching) {
                self.start_search();
            }
        });

        if self.widget.is_searching() {
            ui.vertical_centered(|ui| {
                ui.spinner();
            });
        }
    }
}
