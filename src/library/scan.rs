use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Resolve the ordered list of sources to load.
///
/// Configured entries are joined onto `dir` (absolute entries are kept as
/// they are) and returned in configuration order, whether or not the files
/// exist; a missing file surfaces later as a halted track. An empty list
/// falls back to scanning `dir` when `scan_when_empty` is set.
pub fn resolve_sources(settings: &LibrarySettings) -> Vec<PathBuf> {
    let dir = Path::new(&settings.dir);

    if !settings.tracks.is_empty() {
        return settings
            .tracks
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| dir.join(t))
            .collect();
    }

    if !settings.scan_when_empty {
        debug!("library: no tracks configured and scanning disabled");
        return Vec::new();
    }

    let found = scan(dir, settings);
    info!("library: scanned {} track(s) in {}", found.len(), dir.display());
    found
}

/// Walk `dir` for files with a configured extension, sorted by path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, settings))
        .collect();

    sources.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    sources
}
