//! Gym store commands for gymhuntr-cli

use std::path::{Path, PathBuf};

use crate::config;
use crate::error::Result;
use crate::storage::{read_batch, GymStore};

fn resolve_db_path(db: Option<String>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let path = config::default_db_path()?;
            if let Some(parent) = path.parent() {
                config::ensure_dir(parent)?;
            }
            Ok(path)
        }
    }
}

/// Import a flushed batch file into the gym store
pub async fn import(file: String, db: Option<String>) -> Result<()> {
    let db_path = resolve_db_path(db)?;
    let store = GymStore::open(&db_path)?;

    let gyms = read_batch(Path::new(&file))?;

    let mut inserted = 0u64;
    let mut skipped = 0u64;
    for gym in &gyms {
        if store.upsert_if_absent(gym)? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    println!(
        "Imported {} gyms into {} ({} already present)",
        inserted,
        db_path.display(),
        skipped
    );
    Ok(())
}

/// Show how many gyms the store holds
pub async fn status(db: Option<String>) -> Result<()> {
    let db_path = resolve_db_path(db)?;

    if !db_path.exists() {
        println!("No database found at: {}", db_path.display());
        println!("Run 'gymhuntr import' to create one.");
        return Ok(());
    }

    let store = GymStore::open(&db_path)?;
    println!("Database: {}", db_path.display());
    println!("Gyms stored: {}", store.count()?);
    Ok(())
}
