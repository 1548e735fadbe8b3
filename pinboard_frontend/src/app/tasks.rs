use std::sync::mpsc::Sender;
use std::thread;

use log::{error, info};

use crate::api::ApiClient;
use crate::download::suggested_file_name;
use crate::error::GalleryError;
use crate::models::ImageRecord;

use super::messages::AppMessage;
use super::state::LoadedImage;

pub fn load_catalog(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        info!("fetching catalog from {}", client.endpoint());
        let result = client.list_images();
        if tx.send(AppMessage::CatalogLoaded(result)).is_err() {
            error!("failed to send CatalogLoaded message");
        }
    });
}

pub fn download_thumbnail(client: ApiClient, tx: Sender<AppMessage>, image_id: String, url: String) {
    thread::spawn(move || {
        let result = (|| -> Result<LoadedImage, String> {
            let bytes = client.fetch_bytes(&url).map_err(|e| e.to_string())?;
            let dyn_img =
                image::load_from_memory(&bytes).map_err(|e| format!("Image decode error: {e}"))?;
            let rgba = dyn_img.to_rgba8();
            let size = [dyn_img.width() as usize, dyn_img.height() as usize];
            Ok(LoadedImage {
                size,
                pixels: rgba.as_flat_samples().as_slice().to_vec(),
            })
        })();

        let message = AppMessage::ImageLoaded { image_id, result };
        if tx.send(message).is_err() {
            error!("failed to send ImageLoaded message");
        }
    });
}

pub fn save_image(client: ApiClient, tx: Sender<AppMessage>, record: ImageRecord) {
    thread::spawn(move || {
        let suggested = suggested_file_name(&record.title, &record.url);
        let result = (|| -> crate::error::Result<()> {
            let bytes = client.fetch_bytes(&record.url)?;
            let path = rfd::FileDialog::new()
                .set_file_name(&suggested)
                .save_file()
                .ok_or(GalleryError::DownloadCancelled)?;
            std::fs::write(&path, bytes)?;
            info!("saved {} to {}", record.id, path.display());
            Ok(())
        })();

        let message = AppMessage::ImageSaved {
            image_id: record.id,
            result,
        };
        if tx.send(message).is_err() {
            error!("failed to send ImageSaved message");
        }
    });
}
