use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::model::CountMode;

/// Path to the snapshot file maintained by the ingestion pipeline, from
/// `MONZA_SNAPSHOT_PATH`.
pub fn snapshot_path() -> Option<PathBuf> {
    env::var("MONZA_SNAPSHOT_PATH").ok().map(PathBuf::from)
}

/// How strictly `articleCount` is validated, from `MONZA_COUNT_MODE`.
/// Accepts `strict`, `at-least`, or `off`.
pub fn count_mode() -> CountMode {
    match env::var("MONZA_COUNT_MODE") {
        Ok(value) => CountMode::parse(&value).unwrap_or_else(|| {
            warn!("Unknown MONZA_COUNT_MODE '{}', using strict", value);
            CountMode::default()
        }),
        Err(_) => CountMode::default(),
    }
}

/// Port the API listens on, from `PORT`.
pub fn api_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080)
}
