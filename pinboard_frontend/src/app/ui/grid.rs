use eframe::egui::{self, Color32, RichText};

use crate::config::RECENT_LIMIT;
use crate::models::ImageRecord;
use crate::search;

use super::super::state::LoadState;
use super::super::PinboardApp;

const MIN_COLUMN_WIDTH: f32 = 220.0;
const STRIP_CARD_WIDTH: f32 = 120.0;
const DEFAULT_ASPECT: f32 = 0.75;

/// Assigns each item to the currently shortest column, given each item's
/// height relative to the column width. Returns item indices per column.
pub(crate) fn masonry_columns(aspects: &[f32], columns: usize) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut heights = vec![0.0f32; columns];
    let mut layout = vec![Vec::new(); columns];
    for (index, aspect) in aspects.iter().enumerate() {
        let mut target = 0;
        for (column, height) in heights.iter().enumerate() {
            if *height < heights[target] {
                target = column;
            }
        }
        heights[target] += aspect;
        layout[target].push(index);
    }
    layout
}

impl PinboardApp {
    pub(crate) fn render_home(&mut self, ui: &mut egui::Ui) {
        match &self.load_state {
            LoadState::Pending if self.catalog.is_empty() => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label("Loading images...");
                });
                return;
            }
            LoadState::Failed(err) if self.catalog.is_empty() => {
                let err = err.clone();
                ui.colored_label(Color32::LIGHT_RED, format!("Failed to fetch images: {err}"));
                if ui.button("Retry").clicked() {
                    self.spawn_load_catalog();
                }
                return;
            }
            _ => {}
        }

        let mut to_open: Option<String> = None;

        egui::ScrollArea::vertical()
            .id_salt("home_scroll")
            .show(ui, |ui| {
                ui.heading("Recent");
                let recent = self.catalog.recent(RECENT_LIMIT).to_vec();
                if let Some(id) = self.render_strip(ui, "recent_strip", &recent) {
                    to_open = Some(id);
                }
                ui.add_space(12.0);

                ui.heading("Favourites");
                let favorites: Vec<ImageRecord> = self
                    .favorites
                    .favorites_in(&self.catalog)
                    .into_iter()
                    .cloned()
                    .collect();
                if favorites.is_empty() {
                    ui.label(RichText::new("Tap the heart on any image to keep it here.").weak());
                } else if let Some(id) = self.render_strip(ui, "favourites_strip", &favorites) {
                    to_open = Some(id);
                }
                ui.add_space(12.0);

                let heading = ui.heading("Designs");
                if self.scroll_to_designs {
                    heading.scroll_to_me(Some(egui::Align::TOP));
                    self.scroll_to_designs = false;
                }
                if let Some(id) = self.render_masonry(ui) {
                    to_open = Some(id);
                }
            });

        if let Some(id) = to_open {
            self.open_image(&id);
        }
    }

    fn render_masonry(&mut self, ui: &mut egui::Ui) -> Option<String> {
        let cards: Vec<ImageRecord> = search::filter(&self.catalog, &self.search_query)
            .into_iter()
            .cloned()
            .collect();
        if cards.is_empty() {
            if !self.catalog.is_empty() {
                ui.label(RichText::new("No images match your search.").italics());
            }
            return None;
        }

        let spacing = ui.spacing().item_spacing.x;
        let available = ui.available_width();
        let columns = ((available + spacing) / (MIN_COLUMN_WIDTH + spacing)).floor().max(1.0) as usize;
        let column_width = (available - spacing * (columns as f32 - 1.0)) / columns as f32;

        let aspects: Vec<f32> = cards
            .iter()
            .map(|card| self.aspect_ratio(&card.id).unwrap_or(DEFAULT_ASPECT))
            .collect();
        let layout = masonry_columns(&aspects, columns);

        let mut clicked = None;
        ui.horizontal_top(|ui| {
            for column in layout {
                ui.vertical(|ui| {
                    ui.set_width(column_width);
                    for index in column {
                        if self.render_card(ui, &cards[index], column_width) {
                            clicked = Some(cards[index].id.clone());
                        }
                    }
                });
            }
        });
        clicked
    }

    /// Draws one grid cell; returns true when clicked.
    fn render_card(&mut self, ui: &mut egui::Ui, record: &ImageRecord, width: f32) -> bool {
        let mut clicked = false;
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .inner_margin(egui::vec2(0.0, 0.0))
            .show(ui, |ui| {
                let response = self.render_thumbnail(ui, record, width);
                if response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                clicked |= response.clicked();
                ui.label(RichText::new(record.display_title()).strong());
            });
        clicked
    }

    /// Thumbnail scaled to `width`, or a placeholder while loading.
    pub(crate) fn render_thumbnail(
        &mut self,
        ui: &mut egui::Ui,
        record: &ImageRecord,
        width: f32,
    ) -> egui::Response {
        match self.thumbnail(ui.ctx(), record) {
            Some(texture) => {
                let size = texture.size_vec2();
                let height = if size.x > 0.0 { width * size.y / size.x } else { width * DEFAULT_ASPECT };
                ui.add(
                    egui::Image::from_texture(&texture)
                        .fit_to_exact_size(egui::vec2(width, height))
                        .rounding(8.0)
                        .sense(egui::Sense::click()),
                )
                .on_hover_text(record.display_title())
            }
            None => {
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(width, width * DEFAULT_ASPECT),
                    egui::Sense::click(),
                );
                ui.painter()
                    .rect_filled(rect, 8.0, ui.visuals().faint_bg_color);
                let (text, color) = match self.image_errors.get(&record.id) {
                    Some(_) => ("⚠ unavailable", Color32::LIGHT_RED),
                    None => ("Loading…", ui.visuals().weak_text_color()),
                };
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(13.0),
                    color,
                );
                response
            }
        }
    }

    /// Horizontal strip of small cards; returns the id of a clicked card.
    pub(crate) fn render_strip(
        &mut self,
        ui: &mut egui::Ui,
        id_salt: &str,
        records: &[ImageRecord],
    ) -> Option<String> {
        let mut clicked = None;
        egui::ScrollArea::horizontal()
            .id_salt(id_salt)
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    for record in records {
                        ui.vertical(|ui| {
                            ui.set_width(STRIP_CARD_WIDTH);
                            let response = self.render_thumbnail(ui, record, STRIP_CARD_WIDTH);
                            ui.add(
                                egui::Label::new(RichText::new(record.display_title()).small())
                                    .truncate(),
                            );
                            if response.clicked() {
                                clicked = Some(record.id.clone());
                            }
                        });
                    }
                });
            });
        clicked
    }
}
