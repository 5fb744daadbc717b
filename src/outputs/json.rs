//! JSON output of scraped records.
//!
//! Records are printed as pretty JSON with `--json`, and written to a file
//! with `--output`. Several reviews are written as one JSON array.

use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `record` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(record: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Write `record` as JSON to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_record<T: Serialize + ?Sized>(
    record: &T,
    path: &str,
) -> Result<(), Box<dyn Error>> {
    let json = to_json(record)?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(parent = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!("Wrote JSON record");
    Ok(())
}
