//! Declarative inventory file loading.
//!
//! The file is YAML or TOML (format chosen by extension) and is read through
//! the `config` crate. Loading fails on malformed syntax, missing or blank
//! `id`/`name` fields, and duplicate ids within one entity type.

use std::path::Path;

use config::{Config, File};

use deskbook_core::{AppError, AppResult};

use crate::inventory::InventoryTree;

/// Read and validate a declaration file.
pub fn load_declaration(path: impl AsRef<Path>) -> AppResult<InventoryTree> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::configuration(format!(
            "Declaration file not found: {}",
            path.display()
        )));
    }

    let tree: InventoryTree = Config::builder()
        .add_source(File::from(path).required(true))
        .build()?
        .try_deserialize()?;

    tree.check()?;
    Ok(tree)
}
