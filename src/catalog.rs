// file: src/catalog.rs
// description: drink catalog model and CSV loading

use crate::error::KioskError;
use std::path::Path;
use tracing::{info, warn};

/// One orderable item from the catalog file. `price` is kept as the raw
/// decimal string from the source; identity is the `name` field and
/// duplicates are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,
    pub image: String,
    pub price: String,
}

impl CatalogItem {
    /// Price rendered as `$X.XX`, falling back to the raw string when the
    /// source value is not a parseable number.
    pub fn price_display(&self) -> String {
        match self.price.parse::<f64>() {
            Ok(value) => format!("${value:.2}"),
            Err(_) => format!("${}", self.price),
        }
    }
}

const REQUIRED_COLUMNS: [&str; 3] = ["name", "image", "price"];

/// Parses row-oriented, comma-delimited catalog text. The first row is a
/// header naming fields; data rows are mapped positionally to header names.
/// Rows whose field count does not match the header's are dropped with a
/// warning. Extra columns are ignored; header order is arbitrary.
pub fn parse_catalog(text: &str) -> Result<Vec<CatalogItem>, KioskError> {
    let mut lines = text.trim().lines();
    let header = lines
        .next()
        .ok_or_else(|| KioskError::CatalogParse("empty catalog".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let mut indices = [0usize; 3];
    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[slot] = columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| KioskError::CatalogParse(format!("missing column: {column}")))?;
    }
    let [name_idx, image_idx, price_idx] = indices;

    let mut items = Vec::new();
    for (offset, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.len() {
            warn!(
                row = offset + 2,
                expected = columns.len(),
                found = fields.len(),
                "skipping malformed catalog row"
            );
            continue;
        }
        items.push(CatalogItem {
            name: fields[name_idx].to_string(),
            image: fields[image_idx].to_string(),
            price: fields[price_idx].to_string(),
        });
    }

    Ok(items)
}

/// Reads and parses the catalog file. Any IO or parse fault is terminal for
/// ordering in this session; the caller renders an empty menu instead.
pub async fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>, KioskError> {
    let text = tokio::fs::read_to_string(path).await?;
    let items = parse_catalog(&text)?;
    info!(count = items.len(), path = %path.display(), "catalog loaded");
    Ok(items)
}
