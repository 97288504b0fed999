use std::{fs, path::Path};

use crate::{errors::CoreError, store::Store};

/// Writes the store snapshot to disk atomically by staging to a temporary
/// file and renaming over the target.
pub fn save_store_to_file(store: &Store, path: &Path) -> Result<(), CoreError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(store)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a store snapshot from disk, returning structured errors on failure.
pub fn load_store_from_file(path: &Path) -> Result<Store, CoreError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
