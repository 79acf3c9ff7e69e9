//! JSON import/export for item collections and content files.
//! Items are written as a pretty-printed array with camelCase fields and
//! RFC 3339 timestamps.

use crate::error::Result;
use crate::models::{ContentRecord, SpacedRepetitionItem};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes `items` to a JSON file at `path`, replacing any existing file.
pub fn export_items_to_path(items: &[SpacedRepetitionItem], path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(items)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    tracing::info!("Exported {} items to {}", items.len(), path.display());
    Ok(())
}

/// Reads an item collection previously written by [`export_items_to_path`].
/// The whole file is rejected if any item fails [`SpacedRepetitionItem::validate`].
pub fn import_items(path: &Path) -> Result<Vec<SpacedRepetitionItem>> {
    let file = File::open(path)?;
    let items: Vec<SpacedRepetitionItem> = serde_json::from_reader(BufReader::new(file))?;
    for item in &items {
        item.validate()?;
    }
    tracing::info!("Imported {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Reads a content file: a JSON array of records tagged by `kind`.
pub fn import_content(path: &Path) -> Result<Vec<ContentRecord>> {
    let file = File::open(path)?;
    let records: Vec<ContentRecord> = serde_json::from_reader(BufReader::new(file))?;
    tracing::info!("Loaded {} content records from {}", records.len(), path.display());
    Ok(records)
}
