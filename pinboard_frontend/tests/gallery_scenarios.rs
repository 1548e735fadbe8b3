use pinboard_frontend::catalog::ImageCatalog;
use pinboard_frontend::error::GalleryError;
use pinboard_frontend::favorites::{FavoritesStore, ToggleOutcome};
use pinboard_frontend::history::{HistoryEntry, HistorySync};
use pinboard_frontend::models::ImageRecord;
use pinboard_frontend::navigation::NavigationState;
use pinboard_frontend::search;
use pinboard_frontend::storage::{FileStore, MemoryStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn scenario_catalog() -> ImageCatalog {
    ImageCatalog::from_records(vec![
        ImageRecord::new("a", "Alpine lake", "https://img.example/a.jpg", &["x"]),
        ImageRecord::new("b", "Beach", "https://img.example/b.jpg", &["x"]),
        ImageRecord::new("c", "City", "https://img.example/c.jpg", &["y"]),
    ])
}

fn current_id(sync: &HistorySync, catalog: &ImageCatalog) -> Option<String> {
    sync.navigation().current(catalog).map(|r| r.id.clone())
}

#[test]
fn opening_b_relates_only_to_a() {
    let catalog = scenario_catalog();
    let favorites = FavoritesStore::load(Box::new(MemoryStore::new()));
    let mut sync = HistorySync::default();

    sync.on_user_open(&catalog, "b").expect("open b");
    assert_eq!(current_id(&sync, &catalog).as_deref(), Some("b"));

    let view = sync
        .navigation()
        .view(&catalog, &favorites)
        .expect("gallery view");
    let related: Vec<&str> = view.related.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(related, vec!["a"]);
}

#[test]
fn each_visited_image_is_its_own_history_entry() {
    let catalog = scenario_catalog();
    let mut sync = HistorySync::default();
    let baseline = sync.history().len();

    sync.on_user_open(&catalog, "a").expect("open a");
    assert_eq!(sync.history().location(), "?pin=a");
    sync.next(&catalog).expect("next");
    assert_eq!(sync.history().location(), "?pin=b");
    assert_eq!(sync.history().len(), baseline + 2);

    assert!(sync.back(&catalog).expect("back to a"));
    assert_eq!(current_id(&sync, &catalog).as_deref(), Some("a"));
    assert_eq!(sync.history().location(), "?pin=a");
    assert_eq!(sync.history().current(), &HistoryEntry::pinned("a"));
    assert_eq!(sync.history().len(), baseline + 2);
}

#[test]
fn closing_collapses_history() {
    let catalog = scenario_catalog();
    let mut sync = HistorySync::default();
    sync.on_user_open(&catalog, "c").expect("open c");
    let depth = sync.history().len();

    sync.on_user_close();
    assert_eq!(sync.navigation().state(), NavigationState::Closed);
    assert_eq!(sync.history().len(), depth);
    assert_eq!(sync.history().location(), "/");

    assert!(!sync.forward(&catalog).expect("forward"));
    assert!(!sync.is_open());
}

#[test]
fn stale_bookmark_closes_with_error() {
    let catalog = scenario_catalog();
    let mut sync = HistorySync::from_location("?pin=deleted");

    let err = sync.on_catalog_loaded(&catalog).unwrap_err();
    assert!(matches!(err, GalleryError::UnknownImage(ref id) if id == "deleted"));
    assert!(!sync.is_open());
    assert_eq!(sync.history().location(), "/");
}

#[test]
fn empty_catalog_degrades_gracefully() {
    let catalog = ImageCatalog::new();
    let mut sync = HistorySync::default();
    assert!(sync.on_user_open(&catalog, "a").is_err());
    sync.next(&catalog).expect("next is a no-op");
    sync.previous(&catalog).expect("previous is a no-op");
    assert!(!sync.is_open());
    assert!(search::filter(&catalog, "anything").is_empty());
}

#[test]
fn favorites_persist_across_sessions() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("storage.json");

    let mut favorites = FavoritesStore::load(Box::new(FileStore::open(&path)));
    assert_eq!(favorites.toggle("b").expect("toggle"), ToggleOutcome::Added);
    assert_eq!(favorites.toggle("c").expect("toggle"), ToggleOutcome::Added);
    assert_eq!(favorites.toggle("c").expect("toggle"), ToggleOutcome::Removed);
    drop(favorites);

    let restored = FavoritesStore::load(Box::new(FileStore::open(&path)));
    assert!(restored.is_favorite("b"));
    assert!(!restored.is_favorite("c"));
    assert_eq!(restored.len(), 1);
}

#[test]
fn search_is_case_insensitive_over_tags() {
    let catalog = ImageCatalog::from_records(vec![
        ImageRecord::new("1", "Whiskers", "u", &["cat"]),
        ImageRecord::new("2", "Rex", "u", &["dog"]),
    ]);
    let hits: Vec<&str> = search::filter(&catalog, "CAT")
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(hits, vec!["1"]);
    assert!(catalog.records().iter().all(|r| search::matches(r, "")));
}
