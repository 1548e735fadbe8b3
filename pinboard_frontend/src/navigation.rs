//! Lightbox navigation: which image is shown and how next/previous move.

use crate::catalog::ImageCatalog;
use crate::favorites::FavoritesStore;
use crate::models::ImageRecord;

pub const RELATED_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Closed,
    Open(usize),
}

/// Everything the gallery overlay needs to draw the current image.
#[derive(Debug)]
pub struct GalleryView<'a> {
    pub index: usize,
    pub total: usize,
    pub record: &'a ImageRecord,
    pub related: Vec<&'a ImageRecord>,
    pub is_favorite: bool,
}

impl GalleryView<'_> {
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }
}

/// Owns the current index. While `Open(i)`, `i` is always a valid index into
/// the catalog the controller was last driven with.
#[derive(Debug, Default, Clone)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavigationState::Open(_))
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            NavigationState::Open(index) => Some(index),
            NavigationState::Closed => None,
        }
    }

    pub fn current<'a>(&self, catalog: &'a ImageCatalog) -> Option<&'a ImageRecord> {
        self.current_index().and_then(|index| catalog.get(index))
    }

    /// Opens `id`. Unknown ids leave the state untouched and return `None`.
    pub fn open(&mut self, catalog: &ImageCatalog, id: &str) -> Option<usize> {
        let index = catalog.index_of(id)?;
        self.state = NavigationState::Open(index);
        Some(index)
    }

    pub fn close(&mut self) {
        self.state = NavigationState::Closed;
    }

    pub fn next(&mut self, catalog: &ImageCatalog) -> Option<usize> {
        self.step(catalog, 1)
    }

    pub fn previous(&mut self, catalog: &ImageCatalog) -> Option<usize> {
        self.step(catalog, -1)
    }

    /// Id that `next` would land on, without moving.
    pub fn peek_next<'a>(&self, catalog: &'a ImageCatalog) -> Option<&'a str> {
        self.wrapped(catalog, 1)
            .and_then(|index| catalog.get(index))
            .map(|record| record.id.as_str())
    }

    pub fn peek_previous<'a>(&self, catalog: &'a ImageCatalog) -> Option<&'a str> {
        self.wrapped(catalog, -1)
            .and_then(|index| catalog.get(index))
            .map(|record| record.id.as_str())
    }

    fn step(&mut self, catalog: &ImageCatalog, delta: isize) -> Option<usize> {
        let index = self.wrapped(catalog, delta)?;
        self.state = NavigationState::Open(index);
        Some(index)
    }

    fn wrapped(&self, catalog: &ImageCatalog, delta: isize) -> Option<usize> {
        let current = self.current_index()?;
        let len = catalog.len();
        if len == 0 {
            return None;
        }
        let len = len as isize;
        Some(((current as isize + delta).rem_euclid(len)) as usize)
    }

    /// Re-points the controller after the catalog was replaced. Returns false
    /// when the gallery had to close because `shown_id` no longer resolves.
    pub fn reconcile(&mut self, catalog: &ImageCatalog, shown_id: Option<&str>) -> bool {
        if !self.is_open() {
            return true;
        }
        match shown_id.and_then(|id| catalog.index_of(id)) {
            Some(index) => {
                self.state = NavigationState::Open(index);
                true
            }
            None => {
                self.close();
                false
            }
        }
    }

    pub fn view<'a>(
        &self,
        catalog: &'a ImageCatalog,
        favorites: &FavoritesStore,
    ) -> Option<GalleryView<'a>> {
        let index = self.current_index()?;
        let record = catalog.get(index)?;
        Some(GalleryView {
            index,
            total: catalog.len(),
            record,
            related: catalog.related_to(record, RELATED_LIMIT),
            is_favorite: favorites.is_favorite(&record.id),
        })
    }
}
