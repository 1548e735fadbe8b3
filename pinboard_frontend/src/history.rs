//! Session history for the gallery overlay.
//!
//! [`HistoryStack`] behaves like a browser's session history: pushing drops
//! any forward entries, replacing overwrites the current one, and back/forward
//! only move a cursor. [`HistorySync`] is the single place that decides when
//! an entry is pushed or replaced, and applies popped entries to the
//! [`NavigationController`] without writing history back.

use log::{debug, warn};

use crate::catalog::ImageCatalog;
use crate::error::{GalleryError, Result};
use crate::navigation::NavigationController;

const PIN_PARAM: &str = "pin";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    pub gallery_open: bool,
    pub pinned_id: Option<String>,
}

impl HistoryEntry {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn pinned(id: impl Into<String>) -> Self {
        Self {
            gallery_open: true,
            pinned_id: Some(id.into()),
        }
    }

    /// Visible location for this entry: `?pin=<id>` while open, `/` otherwise.
    pub fn location(&self) -> String {
        match (&self.gallery_open, &self.pinned_id) {
            (true, Some(id)) => format!("?{PIN_PARAM}={id}"),
            _ => "/".to_string(),
        }
    }
}

/// Parses `?pin=<id>`, `pin=<id>` or `/path?x=1&pin=<id>` into an entry.
/// Anything without a non-empty pin is a closed entry.
pub fn parse_location(location: &str) -> HistoryEntry {
    let query = match location.split_once('?') {
        Some((_, query)) => query,
        None => location,
    };
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == PIN_PARAM && !value.trim().is_empty())
        .map(|(_, value)| HistoryEntry::pinned(value.trim()))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(HistoryEntry::closed())
    }
}

impl HistoryStack {
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    pub fn location(&self) -> String {
        self.current().location()
    }

    /// Number of entries, including any forward entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    pub fn replace(&mut self, entry: HistoryEntry) {
        self.entries[self.cursor] = entry;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&HistoryEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

/// Keeps [`NavigationController`] and [`HistoryStack`] consistent: the
/// current entry is open with pin `id` exactly when the gallery shows `id`.
#[derive(Debug, Default, Clone)]
pub struct HistorySync {
    navigation: NavigationController,
    history: HistoryStack,
}

impl HistorySync {
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            navigation: NavigationController::new(),
            history: HistoryStack::new(initial),
        }
    }

    pub fn from_location(location: &str) -> Self {
        Self::new(parse_location(location))
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn is_open(&self) -> bool {
        self.navigation.is_open()
    }

    pub fn on_user_open(&mut self, catalog: &ImageCatalog, id: &str) -> Result<()> {
        if self.navigation.open(catalog, id).is_none() {
            return Err(GalleryError::UnknownImage(id.to_string()));
        }
        debug!("gallery opened on {id}");
        self.history.push(HistoryEntry::pinned(id));
        Ok(())
    }

    /// Moves the open gallery to `id`; every image visited gets its own entry.
    pub fn on_user_navigate(&mut self, catalog: &ImageCatalog, id: &str) -> Result<()> {
        if self.navigation.open(catalog, id).is_none() {
            return Err(GalleryError::UnknownImage(id.to_string()));
        }
        self.history.push(HistoryEntry::pinned(id));
        Ok(())
    }

    pub fn next(&mut self, catalog: &ImageCatalog) -> Result<()> {
        match self.navigation.peek_next(catalog).map(str::to_owned) {
            Some(id) => self.on_user_navigate(catalog, &id),
            None => Ok(()),
        }
    }

    pub fn previous(&mut self, catalog: &ImageCatalog) -> Result<()> {
        match self.navigation.peek_previous(catalog).map(str::to_owned) {
            Some(id) => self.on_user_navigate(catalog, &id),
            None => Ok(()),
        }
    }

    /// Closing collapses history: the current entry is replaced, never pushed.
    pub fn on_user_close(&mut self) {
        self.navigation.close();
        self.history.replace(HistoryEntry::closed());
    }

    /// Applies the current entry after the cursor moved by back/forward.
    /// Never pushes. A pin that no longer resolves closes the gallery,
    /// rewrites that same entry as closed, and reports
    /// [`GalleryError::UnknownImage`].
    pub fn on_history_popped(&mut self, catalog: &ImageCatalog) -> Result<()> {
        let current = self.history.current();
        let pinned = current
            .gallery_open
            .then(|| current.pinned_id.clone().unwrap_or_default());

        match pinned {
            Some(id) => {
                if self.navigation.open(catalog, &id).is_some() {
                    return Ok(());
                }
                warn!("history entry points at unknown image {id:?}, closing gallery");
                self.navigation.close();
                self.history.replace(HistoryEntry::closed());
                Err(GalleryError::UnknownImage(id))
            }
            None => {
                self.navigation.close();
                Ok(())
            }
        }
    }

    /// Goes back one entry. `Ok(false)` when already at the oldest entry.
    pub fn back(&mut self, catalog: &ImageCatalog) -> Result<bool> {
        if self.history.back().is_none() {
            return Ok(false);
        }
        self.on_history_popped(catalog)?;
        Ok(true)
    }

    pub fn forward(&mut self, catalog: &ImageCatalog) -> Result<bool> {
        if self.history.forward().is_none() {
            return Ok(false);
        }
        self.on_history_popped(catalog)?;
        Ok(true)
    }

    /// Re-applies the current entry after the catalog was replaced: follows
    /// the shown image to its new index, opens a deep-linked pin, or closes
    /// when the pin no longer resolves.
    pub fn on_catalog_loaded(&mut self, catalog: &ImageCatalog) -> Result<()> {
        let current = self.history.current().clone();
        if self.navigation.is_open() {
            if self
                .navigation
                .reconcile(catalog, current.pinned_id.as_deref())
            {
                return Ok(());
            }
            self.history.replace(HistoryEntry::closed());
            return Err(GalleryError::UnknownImage(
                current.pinned_id.unwrap_or_default(),
            ));
        }
        if current.gallery_open {
            return self.on_history_popped(catalog);
        }
        Ok(())
    }
}
