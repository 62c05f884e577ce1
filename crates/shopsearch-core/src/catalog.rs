//! Catalog snapshots read from JSON.
//!
//! Accepts either a top-level array of product records or an object with a
//! `products` array. Individual records are decoded leniently (see
//! [`Product`]); only a document that is not JSON at all, or has no product
//! list, is an error.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Product;

pub fn parse_catalog(json: &str) -> Result<Vec<Product>> {
    let document: Value = serde_json::from_str(json)?;
    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(records)) => records,
            _ => return Err(Error::InvalidCatalog("expected a `products` array".into())),
        },
        _ => return Err(Error::InvalidCatalog("expected an array of products".into())),
    };
    Ok(records.into_iter().map(Product::from).collect())
}

/// Load a catalog file, or every `*.json` file under a directory in path order.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>> {
    if !path.is_dir() {
        let products = parse_catalog(&read_file_content(path)?)?;
        tracing::debug!(path = %path.display(), records = products.len(), "loaded catalog");
        return Ok(products);
    }

    let files = list_json_files(path);
    if files.is_empty() {
        tracing::warn!(dir = %path.display(), "no .json files found; catalog is empty");
    }
    let mut products = Vec::new();
    for file in &files {
        let batch = parse_catalog(&read_file_content(file)?)?;
        tracing::debug!(path = %file.display(), records = batch.len(), "loaded catalog part");
        products.extend(batch);
    }
    tracing::debug!(dir = %path.display(), files = files.len(), records = products.len(), "loaded catalog");
    Ok(products)
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

/// Read once; invalid UTF-8 is replaced rather than rejected.
fn read_file_content(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
