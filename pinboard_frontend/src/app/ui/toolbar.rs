use eframe::egui::{self, RichText};

use super::super::PinboardApp;

impl PinboardApp {
    pub(crate) fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let history = self.gallery.history();
            let can_back = history.can_go_back();
            let can_forward = history.can_go_forward();
            let location = history.location();

            if ui
                .add_enabled(can_back, egui::Button::new("⬅"))
                .on_hover_text("Back (Alt+←)")
                .clicked()
            {
                self.history_back();
            }
            if ui
                .add_enabled(can_forward, egui::Button::new("➡"))
                .on_hover_text("Forward (Alt+→)")
                .clicked()
            {
                self.history_forward();
            }
            ui.label(RichText::new(location).monospace().weak());

            ui.separator();
            ui.heading("Pinboard");
            ui.separator();

            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_query)
                    .hint_text("Search titles and tags")
                    .desired_width(280.0),
            );
            if search.changed() {
                self.scroll_to_designs = true;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Refresh").clicked() {
                    self.spawn_load_catalog();
                }
                ui.label(format!("♥ {}", self.favorites.len()));
            });
        });
    }
}
