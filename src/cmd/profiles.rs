//! Profiles command CLI handler.

use crate::profile::ProfileStore;
use std::path::PathBuf;

pub fn run(profile_file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match profile_file {
        Some(p) => p,
        None => ProfileStore::default_path()
            .ok_or_else(|| anyhow::anyhow!("no profile file location available on this system"))?,
    };

    if !path.exists() {
        eprintln!("No profile file at '{}'", path.display());
        return Ok(());
    }

    let store = ProfileStore::load(&path)?;

    if store.is_empty() {
        eprintln!("Profile file '{}' contains no profiles", path.display());
        return Ok(());
    }

    println!("Profiles in '{}':", path.display());
    for (name, profile) in store.iter() {
        let mut parts = Vec::new();
        if !profile.column_sep.is_empty() {
            parts.push(format!("column_sep='{}'", profile.column_sep));
        }
        if !profile.string_sep.is_empty() {
            parts.push(format!("string_sep='{}'", profile.string_sep));
        }
        if let Some(block_size) = profile.block_size {
            parts.push(format!("block_size={}", block_size));
        }

        if parts.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {} ({})", name, parts.join(", "));
        }
    }

    Ok(())
}
