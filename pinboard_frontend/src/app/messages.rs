use log::{error, info, warn};

use crate::error::{GalleryError, Result};
use crate::models::ImageRecord;

use super::state::{LoadState, LoadedImage};
use super::PinboardApp;

pub enum AppMessage {
    CatalogLoaded(Result<Vec<ImageRecord>>),
    ImageLoaded {
        image_id: String,
        result: std::result::Result<LoadedImage, String>,
    },
    ImageSaved {
        image_id: String,
        result: Result<()>,
    },
}

pub fn process_messages(app: &mut PinboardApp) {
    while let Ok(message) = app.rx.try_recv() {
        match message {
            AppMessage::CatalogLoaded(result) => handle_catalog_loaded(app, result),
            AppMessage::ImageLoaded { image_id, result } => {
                app.on_download_complete();
                app.image_loading.remove(&image_id);
                match result {
                    Ok(image) => {
                        app.image_pending.insert(image_id, image);
                    }
                    Err(err) => {
                        warn!("thumbnail {image_id} failed: {err}");
                        app.image_errors.insert(image_id, err);
                    }
                }
            }
            AppMessage::ImageSaved { image_id, result } => match result {
                Ok(()) => app.toasts.push("Download started"),
                Err(GalleryError::DownloadCancelled) => {}
                Err(err) => {
                    error!("download of {image_id} failed: {err}");
                    app.toasts.push("Download failed");
                }
            },
        }
    }
}

fn handle_catalog_loaded(app: &mut PinboardApp, result: Result<Vec<ImageRecord>>) {
    match result {
        Ok(records) => {
            info!("catalog loaded with {} images", records.len());
            app.catalog.load(records);
            app.load_state = LoadState::Resolved;
            app.image_errors.clear();
            if let Err(err) = app.gallery.on_catalog_loaded(&app.catalog) {
                app.toasts.push(err.to_string());
            }
        }
        Err(err) => {
            error!("failed to fetch images: {err}");
            app.load_state = LoadState::Failed(err.to_string());
            app.toasts.push("Could not load images");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::config::PinboardConfig;

    fn app_in(dir: &std::path::Path) -> PinboardApp {
        let config = PinboardConfig {
            api_url: "http://127.0.0.1:9/api/images".to_string(),
            data_dir: dir.to_path_buf(),
            http_timeout: Duration::from_secs(1),
            initial_location: None,
        };
        PinboardApp::from_config(config).expect("app")
    }

    fn toast_messages(app: &mut PinboardApp) -> Vec<String> {
        app.toasts
            .visible(Instant::now())
            .map(|toast| toast.message.clone())
            .collect()
    }

    fn saved(id: &str, result: Result<()>) -> AppMessage {
        AppMessage::ImageSaved {
            image_id: id.to_string(),
            result,
        }
    }

    #[test]
    fn download_toast_only_after_save_succeeds() {
        let dir = tempdir().expect("tempdir");
        let mut app = app_in(dir.path());

        app.tx
            .send(saved("a", Err(GalleryError::Storage(std::io::Error::other("disk full")))))
            .expect("send");
        process_messages(&mut app);
        assert_eq!(toast_messages(&mut app), vec!["Download failed".to_string()]);

        app.tx
            .send(saved("a", Err(GalleryError::DownloadCancelled)))
            .expect("send");
        app.tx.send(saved("b", Ok(()))).expect("send");
        process_messages(&mut app);
        assert_eq!(
            toast_messages(&mut app),
            vec!["Download failed".to_string(), "Download started".to_string()]
        );
    }

    #[test]
    fn catalog_reload_forgets_failed_thumbnails() {
        let dir = tempdir().expect("tempdir");
        let mut app = app_in(dir.path());
        app.image_errors
            .insert("a".to_string(), "connection reset".to_string());

        app.tx
            .send(AppMessage::CatalogLoaded(Err(GalleryError::UnknownImage(
                "offline".to_string(),
            ))))
            .expect("send");
        process_messages(&mut app);
        assert!(app.image_errors.contains_key("a"));

        let records = vec![ImageRecord::new("a", "A", "https://img.example/a.jpg", &[])];
        app.tx
            .send(AppMessage::CatalogLoaded(Ok(records)))
            .expect("send");
        process_messages(&mut app);
        assert!(app.image_errors.is_empty());
        assert_eq!(app.load_state, LoadState::Resolved);
    }
}
