use eframe::egui::{self, Color32, Context, RichText};

use crate::models::ImageRecord;

use super::super::state::Swipe;
use super::super::PinboardApp;

const OVERLAY_FILL: Color32 = Color32::from_rgb(212, 212, 212);
const MAX_CONTENT_WIDTH: f32 = 900.0;

enum GalleryAction {
    Close,
    Next,
    Previous,
    ToggleFavorite,
    Download,
    Open(String),
    Swipe(Swipe),
}

impl PinboardApp {
    pub(crate) fn render_gallery(&mut self, ctx: &Context) {
        let Some(view) = self.gallery.navigation().view(&self.catalog, &self.favorites) else {
            return;
        };
        let position = view.position_label();
        let record = view.record.clone();
        let is_favorite = view.is_favorite;
        let related: Vec<ImageRecord> = view.related.into_iter().cloned().collect();

        let screen = ctx.screen_rect();
        let mut action: Option<GalleryAction> = None;

        egui::Area::new(egui::Id::new("gallery_overlay"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(screen, 0.0, OVERLAY_FILL);
                let backdrop = ui.allocate_rect(screen, egui::Sense::drag());
                let pointer_x = ctx.input(|i| i.pointer.interact_pos()).map(|pos| pos.x);
                if backdrop.drag_started() {
                    if let Some(x) = pointer_x {
                        self.swipe.begin(x);
                    }
                }
                if backdrop.drag_stopped() {
                    if let Some(swipe) = pointer_x.and_then(|x| self.swipe.end(x)) {
                        action = Some(GalleryAction::Swipe(swipe));
                    }
                }

                let close_rect = egui::Rect::from_min_size(
                    egui::pos2(screen.max.x - 64.0, screen.min.y + 18.0),
                    egui::vec2(36.0, 36.0),
                );
                if ui
                    .put(close_rect, egui::Button::new(RichText::new("✕").size(20.0)))
                    .on_hover_text("Close (Esc)")
                    .clicked()
                {
                    action = Some(GalleryAction::Close);
                }

                let content_rect = screen.shrink2(egui::vec2(0.0, 40.0));
                ui.allocate_ui_at_rect(content_rect, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("gallery_scroll")
                        .show(ui, |ui| {
                            ui.vertical_centered(|ui| {
                                let width = (screen.width() * 0.9).min(MAX_CONTENT_WIDTH);
                                let max_height = screen.height() * 0.7;
                                self.render_full_image(ui, &record, width, max_height);

                                ui.add_space(8.0);
                                ui.label(
                                    RichText::new(record.display_title())
                                        .heading()
                                        .color(Color32::BLACK),
                                );
                                ui.add_space(8.0);

                                ui.horizontal(|ui| {
                                    let inset = ((ui.available_width() - 360.0) / 2.0).max(0.0);
                                    ui.add_space(inset);
                                    if ui.button("◀").on_hover_text("Previous (←)").clicked() {
                                        action = Some(GalleryAction::Previous);
                                    }
                                    let heart = if is_favorite {
                                        RichText::new("♥").size(22.0).color(Color32::from_rgb(230, 60, 80))
                                    } else {
                                        RichText::new("♡").size(22.0).color(Color32::WHITE)
                                    };
                                    if ui
                                        .add(egui::Button::new(heart).fill(Color32::from_gray(30)))
                                        .on_hover_text("Favorite")
                                        .clicked()
                                    {
                                        action = Some(GalleryAction::ToggleFavorite);
                                    }
                                    if ui
                                        .add(
                                            egui::Button::new(
                                                RichText::new("⬇").size(22.0).color(Color32::WHITE),
                                            )
                                            .fill(Color32::from_gray(30)),
                                        )
                                        .on_hover_text("Download")
                                        .clicked()
                                    {
                                        action = Some(GalleryAction::Download);
                                    }
                                    if ui.button("Open original").clicked() {
                                        if let Err(err) = open::that(&record.url) {
                                            log::warn!("could not open {}: {err}", record.url);
                                        }
                                    }
                                    if ui.button("▶").on_hover_text("Next (→)").clicked() {
                                        action = Some(GalleryAction::Next);
                                    }
                                    ui.label(RichText::new(&position).color(Color32::DARK_GRAY));
                                });

                                ui.add_space(12.0);
                                if !related.is_empty() {
                                    ui.label(RichText::new("Related").strong().color(Color32::BLACK));
                                    if let Some(id) = self.render_strip(ui, "related_strip", &related) {
                                        action = Some(GalleryAction::Open(id));
                                    }
                                }
                            });
                        });
                });
            });

        match action {
            Some(GalleryAction::Close) => self.close_gallery(),
            Some(GalleryAction::Next) => self.show_next(),
            Some(GalleryAction::Previous) => self.show_previous(),
            Some(GalleryAction::ToggleFavorite) => self.toggle_current_favorite(),
            Some(GalleryAction::Download) => self.download_current(),
            Some(GalleryAction::Open(id)) => self.open_image(&id),
            Some(GalleryAction::Swipe(swipe)) => self.apply_swipe(swipe),
            None => {}
        }
    }

    fn render_full_image(&mut self, ui: &mut egui::Ui, record: &ImageRecord, width: f32, max_height: f32) {
        match self.thumbnail(ui.ctx(), record) {
            Some(texture) => {
                let size = texture.size_vec2().max(egui::vec2(1.0, 1.0));
                let scale = (width / size.x).min(max_height / size.y).min(1.0);
                ui.add(
                    egui::Image::from_texture(&texture)
                        .fit_to_exact_size(size * scale)
                        .rounding(12.0),
                );
            }
            None if self.image_errors.contains_key(&record.id) => {
                ui.colored_label(Color32::DARK_RED, "This image could not be loaded.");
                ui.hyperlink_to(record.display_title(), &record.url);
            }
            None => {
                ui.add_space(max_height / 3.0);
                ui.add(egui::Spinner::new().size(40.0));
                ui.add_space(max_height / 3.0);
            }
        }
    }
}
