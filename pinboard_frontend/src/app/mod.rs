use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{self, Context, TextureHandle};
use log::warn;

use crate::api::ApiClient;
use crate::catalog::ImageCatalog;
use crate::config::{PinboardConfig, MAX_CONCURRENT_DOWNLOADS};
use crate::favorites::FavoritesStore;
use crate::history::HistorySync;
use crate::models::ImageRecord;
use crate::storage::FileStore;

mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{LoadState, LoadedImage, Swipe, SwipeTracker, Toasts};

pub struct PinboardApp {
    api: ApiClient,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    catalog: ImageCatalog,
    favorites: FavoritesStore,
    gallery: HistorySync,
    load_state: LoadState,
    search_query: String,
    scroll_to_designs: bool,
    toasts: Toasts,
    swipe: SwipeTracker,
    image_textures: HashMap<String, TextureHandle>,
    image_loading: HashSet<String>,
    image_pending: HashMap<String, LoadedImage>,
    image_errors: HashMap<String, String>,
    download_queue: VecDeque<(String, String)>, // (image_id, url)
    active_downloads: usize,
}

impl PinboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: PinboardConfig) -> Result<Self> {
        let mut app = Self::from_config(config)?;
        app.spawn_load_catalog();
        Ok(app)
    }

    fn from_config(config: PinboardConfig) -> Result<Self> {
        let api = ApiClient::new(config.api_url.clone(), config.http_timeout)?;
        let store = FileStore::open(config.storage_path());
        let favorites = FavoritesStore::load(Box::new(store));
        let gallery = match config.initial_location.as_deref() {
            Some(location) => HistorySync::from_location(location),
            None => HistorySync::default(),
        };
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            api,
            tx,
            rx,
            catalog: ImageCatalog::new(),
            favorites,
            gallery,
            load_state: LoadState::Resolved,
            search_query: String::new(),
            scroll_to_designs: false,
            toasts: Toasts::default(),
            swipe: SwipeTracker::default(),
            image_textures: HashMap::new(),
            image_loading: HashSet::new(),
            image_pending: HashMap::new(),
            image_errors: HashMap::new(),
            download_queue: VecDeque::new(),
            active_downloads: 0,
        })
    }

    fn spawn_load_catalog(&mut self) {
        if self.load_state.is_pending() {
            return;
        }
        self.load_state = LoadState::Pending;
        tasks::load_catalog(self.api.clone(), self.tx.clone());
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    fn spawn_download_image(&mut self, image_id: &str, url: &str) {
        self.image_loading.insert(image_id.to_string());
        self.download_queue
            .push_back((image_id.to_string(), url.to_string()));
        self.process_download_queue();
    }

    fn process_download_queue(&mut self) {
        while self.active_downloads < MAX_CONCURRENT_DOWNLOADS {
            let Some((image_id, url)) = self.download_queue.pop_front() else {
                break;
            };
            self.active_downloads += 1;
            tasks::download_thumbnail(self.api.clone(), self.tx.clone(), image_id, url);
        }
    }

    fn on_download_complete(&mut self) {
        if self.active_downloads > 0 {
            self.active_downloads -= 1;
        }
        self.process_download_queue();
    }

    /// Texture for `record`, queueing a download the first time it is asked for.
    fn thumbnail(&mut self, ctx: &Context, record: &ImageRecord) -> Option<TextureHandle> {
        if let Some(texture) = self.image_textures.get(&record.id) {
            return Some(texture.clone());
        }
        if let Some(pending) = self.image_pending.remove(&record.id) {
            let color = egui::ColorImage::from_rgba_unmultiplied(pending.size, &pending.pixels);
            let texture = ctx.load_texture(&record.id, color, egui::TextureOptions::default());
            self.image_textures.insert(record.id.clone(), texture.clone());
            return Some(texture);
        }
        if !self.image_errors.contains_key(&record.id) && !self.image_loading.contains(&record.id) {
            self.spawn_download_image(&record.id, &record.url);
        }
        None
    }

    /// Height over width of a loaded thumbnail, if known.
    fn aspect_ratio(&self, id: &str) -> Option<f32> {
        let size = self.image_textures.get(id)?.size_vec2();
        (size.x > 0.0).then(|| size.y / size.x)
    }

    fn open_image(&mut self, id: &str) {
        if let Err(err) = self.gallery.on_user_open(&self.catalog, id) {
            warn!("could not open {id}: {err}");
            self.toasts.push(err.to_string());
        }
    }

    fn show_next(&mut self) {
        if let Err(err) = self.gallery.next(&self.catalog) {
            self.toasts.push(err.to_string());
        }
    }

    fn show_previous(&mut self) {
        if let Err(err) = self.gallery.previous(&self.catalog) {
            self.toasts.push(err.to_string());
        }
    }

    fn close_gallery(&mut self) {
        self.gallery.on_user_close();
    }

    fn history_back(&mut self) {
        if let Err(err) = self.gallery.back(&self.catalog) {
            self.toasts.push(err.to_string());
        }
    }

    fn history_forward(&mut self) {
        if let Err(err) = self.gallery.forward(&self.catalog) {
            self.toasts.push(err.to_string());
        }
    }

    fn apply_swipe(&mut self, swipe: Swipe) {
        match swipe {
            Swipe::Previous => self.show_previous(),
            Swipe::Next => self.show_next(),
        }
    }

    fn toggle_current_favorite(&mut self) {
        let Some(id) = self
            .gallery
            .navigation()
            .current(&self.catalog)
            .map(|record| record.id.clone())
        else {
            return;
        };
        match self.favorites.toggle(&id) {
            Ok(outcome) => self.toasts.push(outcome.message()),
            Err(err) => self.toasts.push(format!("Could not save favorites: {err}")),
        }
    }

    fn download_current(&mut self) {
        let Some(record) = self.gallery.navigation().current(&self.catalog).cloned() else {
            return;
        };
        tasks::save_image(self.api.clone(), self.tx.clone(), record);
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (left, right, escape, alt, extra_back, extra_forward) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Escape),
                i.modifiers.alt,
                i.pointer.button_pressed(egui::PointerButton::Extra1),
                i.pointer.button_pressed(egui::PointerButton::Extra2),
            )
        });

        if (alt && left) || extra_back {
            self.history_back();
            return;
        }
        if (alt && right) || extra_forward {
            self.history_forward();
            return;
        }
        if !self.gallery.is_open() {
            return;
        }
        if left {
            self.show_previous();
        } else if right {
            self.show_next();
        } else if escape {
            self.close_gallery();
        }
    }

    fn render_toasts(&mut self, ctx: &Context) {
        let now = Instant::now();
        let messages: Vec<String> = self
            .toasts
            .visible(now)
            .map(|toast| toast.message.clone())
            .collect();
        if messages.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -20.0))
            .order(egui::Order::Tooltip)
            .show(ctx, |ui| {
                for message in messages {
                    egui::Frame::none()
                        .fill(egui::Color32::from_gray(17))
                        .rounding(8.0)
                        .inner_margin(egui::Margin::symmetric(14.0, 8.0))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, message);
                        });
                    ui.add_space(4.0);
                }
            });
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

impl eframe::App for PinboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_home(ui);
        });

        if self.gallery.is_open() {
            self.render_gallery(ctx);
        }

        self.render_toasts(ctx);

        if self.load_state.is_pending() || self.active_downloads > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
