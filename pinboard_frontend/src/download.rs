use std::path::Path;

use reqwest::Url;

const FALLBACK_NAME: &str = "image";

/// File name offered in the save dialog: the record title made safe for the
/// filesystem, with the URL's extension appended when the title has none.
pub fn suggested_file_name(title: &str, url: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = cleaned.trim_matches('.').trim();
    let stem = if stem.is_empty() { FALLBACK_NAME } else { stem };

    if short_extension(stem).is_some() {
        return stem.to_string();
    }
    match url_extension(url) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.last()?.to_string();
    short_extension(&last).map(|ext| ext.to_lowercase())
}

fn short_extension(name: &str) -> Option<&str> {
    let ext = Path::new(name).extension()?.to_str()?;
    if !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}
