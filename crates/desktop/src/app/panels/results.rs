//! Error banner and the nutrition facts card

use eframe::egui;
use egui_phosphor::regular;

use super::ACCENT;
use crate::app::NutritionAnalyzerApp;

impl NutritionAnalyzerApp {
    pub(crate) fn render_error(&self, ui: &mut egui::Ui) {
        let Some(message) = self.widget.error() else {
            return;
        };

        egui::Frame::new()
            .fill(egui::Color32::from_rgb(254, 226, 226))
            .corner_radius(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", regular::WARNING_CIRCLE, message))
                            .color(egui::Color32::from_rgb(185, 28, 28)),
                    );
                });
            });
        ui.add_space(8.0);
    }

    pub(crate) fn render_results(&self, ui: &mut egui::Ui) {
        let Some(nutrition) = &self.widget.nutrition else {
            return;
        };

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("Nutrition Facts ({}g)", self.widget.grams()))
                    .heading()
                    .color(ACCENT),
            );
            if !nutrition.food_name.is_empty() {
                ui.label(egui::RichText::new(&nutrition.food_name).strong());
            }
            if !self.widget.detected_food.is_empty() {
                ui.label(
                    egui::RichText::new(format!("Detected: {}", self.widget.detected_food))
                        .color(egui::Color32::GRAY)
                        .small(),
                );
            }
            ui.add_space(6.0);

            egui::Grid::new("nutrition_facts")
                .num_columns(2)
                .spacing([48.0, 8.0])
                .show(ui, |ui| {
                    fact(ui, "Calories:", nutrition.calories_display());
                    fact(ui, "Protein:", nutrition.protein_display());
                    ui.end_row();
                    fact(ui, "Fat:", nutrition.fat_display());
                    fact(ui, "Carbohydrates:", nutrition.carbohydrate_display());
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!("Serving: {}", nutrition.serving_display()))
                    .color(egui::Color32::GRAY)
                    .small(),
            );
        });
    }
}

fn fact(ui: &mut egui::Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(label);
        ui.label(egui::RichText::new(value).strong());
    });
}
