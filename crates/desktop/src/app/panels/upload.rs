//! Photo selection, preview, grams field and the Analyze button

use eframe::egui;
use egui_phosphor::regular;

use super::ACCENT;
use crate::app::NutritionAnalyzerApp;

impl NutritionAnalyzerApp {
    pub(crate) fn render_upload_section(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(regular::UPLOAD_SIMPLE).size(28.0).color(egui::Color32::GRAY));
                ui.label("Drop a photo onto the window, or open one by path");
            });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Image file:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.image_path)
                        .desired_width(ui.available_width() - 80.0)
                        .hint_text("/path/to/food.jpg"),
                );
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button(format!("{} Open", regular::FOLDER_OPEN)).clicked() || submitted {
                    self.load_image_path(&ctx);
                }
            });
        });

        if let Some(uri) = self.preview_uri.clone() {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::Image::new(uri)
                        .max_height(256.0)
                        .max_width(ui.available_width() - 40.0)
                        .corner_radius(8.0),
                );
                if ui.button(regular::X).on_hover_text("Remove image").clicked() {
                    self.remove_image(&ctx);
                }
            });
        } else if self.widget.image.is_some() {
            // Selected but not previewable; still allow removal
            ui.horizontal(|ui| {
                ui.label(format!("{} Image selected", regular::IMAGE));
                if ui.button(regular::X).on_hover_text("Remove image").clicked() {
                    self.remove_image(&ctx);
                }
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Grams:");
            let mut text = self.widget.grams_text().to_string();
            if ui
                .add(egui::TextEdit::singleline(&mut text).desired_width(80.0).char_limit(4))
                .changed()
            {
                // Rejected edits snap back on the next frame
                self.widget.edit_grams(&text);
            }
            if self.widget.grams() == 0 {
                ui.label(
                    egui::RichText::new(format!("{} Empty field: lookups will ask for 0 g", regular::WARNING))
                        .color(egui::Color32::YELLOW)
                        .small(),
                );
            }
        });

        ui.add_space(8.0);
        let label = if self.widget.is_analyzing() {
            "Analyzing...".to_string()
        } else {
            format!("{} Analyze Image", regular::MAGIC_WAND)
        };
        let button = egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
            .fill(ACCENT)
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(self.widget.can_analyze(), button).clicked() {
            self.start_analyze();
        }
    }
}
