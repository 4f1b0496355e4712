//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.text_generation.api_key.as_deref().unwrap_or("");

    format!(
        r#"[overpass]
; Overpass API interpreter endpoint for building footprints
url = {}
; Request timeout in seconds (default: 70)
timeout = {}
; Attempts per live fetch before falling back to stale cache (default: 3)
max_attempts = {}
; Base backoff in seconds; attempt n waits n * backoff_secs (default: 2.0)
backoff_secs = {}

[text_generation]
; Hosted model used when the rule parser cannot read a query
url = {}
; Bearer credential. Leave empty to disable the fallback.
; The HF_API_KEY environment variable takes precedence.
api_key = {}
; Request timeout in seconds (default: 60)
timeout = {}
; Generation budget per request (default: 80)
max_new_tokens = {}

[cache]
; SQLite database holding cached building payloads and saved projects
database = {}
; Serve cached buildings younger than this without fetching (seconds, default: 21600)
fresh_max_age = {}
; Fall back to cached buildings younger than this when fetching fails
; (seconds, default: 31536000)
stale_max_age = {}

[region]
; Default bounding box in degrees
west = {}
south = {}
east = {}
north = {}

[logging]
; Log file, truncated at the start of each run
file = {}
"#,
        config.overpass.url,
        config.overpass.timeout,
        config.overpass.max_attempts,
        config.overpass.backoff_secs,
        config.text_generation.url,
        api_key,
        config.text_generation.timeout,
        config.text_generation.max_new_tokens,
        path_to_string(&config.cache.database),
        config.cache.fresh_max_age,
        config.cache.stale_max_age,
        config.region.west,
        config.region.south,
        config.region.east,
        config.region.north,
        path_to_string(&config.logging.file),
    )
}

/// Renders a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
