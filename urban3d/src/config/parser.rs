//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [overpass] section
    if let Some(section) = ini.section(Some("overpass")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                config.overpass.url = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout") {
            config.overpass.timeout = parse_positive("overpass", "timeout", v, "seconds")?;
        }
        if let Some(v) = section.get("max_attempts") {
            config.overpass.max_attempts = parse_positive("overpass", "max_attempts", v, "attempts")?;
        }
        if let Some(v) = section.get("backoff_secs") {
            let backoff: f64 = parse_value("overpass", "backoff_secs", v, "must be a number of seconds")?;
            if !backoff.is_finite() || backoff < 0.0 {
                return Err(invalid("overpass", "backoff_secs", v, "must be zero or more seconds"));
            }
            config.overpass.backoff_secs = backoff;
        }
    }

    // [text_generation] section
    if let Some(section) = ini.section(Some("text_generation")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                config.text_generation.url = v.to_string();
            }
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.text_generation.api_key = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("timeout") {
            config.text_generation.timeout =
                parse_positive("text_generation", "timeout", v, "seconds")?;
        }
        if let Some(v) = section.get("max_new_tokens") {
            config.text_generation.max_new_tokens =
                parse_positive("text_generation", "max_new_tokens", v, "tokens")?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("database") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache.database = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("fresh_max_age") {
            config.cache.fresh_max_age = parse_value(
                "cache",
                "fresh_max_age",
                v,
                "must be a non-negative integer (seconds)",
            )?;
        }
        if let Some(v) = section.get("stale_max_age") {
            config.cache.stale_max_age = parse_value(
                "cache",
                "stale_max_age",
                v,
                "must be a non-negative integer (seconds)",
            )?;
        }
    }

    // [region] section
    if let Some(section) = ini.section(Some("region")) {
        let region = &mut config.region;
        for (key, field) in [
            ("west", &mut region.west),
            ("south", &mut region.south),
            ("east", &mut region.east),
            ("north", &mut region.north),
        ] {
            if let Some(v) = section.get(key) {
                *field = parse_value("region", key, v, "must be a number of degrees")?;
            }
        }
        if region.west >= region.east {
            return Err(invalid(
                "region",
                "east",
                &region.east.to_string(),
                "must be greater than west",
            ));
        }
        if region.south >= region.north {
            return Err(invalid(
                "region",
                "north",
                &region.north.to_string(),
                "must be greater than south",
            ));
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn parse_positive<T>(section: &str, key: &str, value: &str, unit: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + Default + PartialEq,
{
    let reason = format!("must be a positive integer ({})", unit);
    let parsed: T = parse_value(section, key, value, &reason)?;
    if parsed == T::default() {
        return Err(invalid(section, key, value, &reason));
    }
    Ok(parsed)
}

/// Expands a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
