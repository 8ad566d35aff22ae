use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

/// Resolves the portable on-disk layout: a `data/` tree kept next to the
/// executable, holding the database and exported documents.
pub struct PortablePaths;

impl PortablePaths {
    /// Application root directory (where the executable lives).
    pub fn root_dir() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            // In development the executable sits in target/debug at the
            // workspace root; point at apps/core instead.
            let mut path = std::env::current_exe().expect("Failed to get current exe");
            path.pop(); // remove exe name
            path.pop(); // remove debug
            path.pop(); // remove target

            let core_path = path.join("apps").join("core");
            if core_path.exists() {
                return core_path;
            }

            return path;
        }

        #[cfg(not(debug_assertions))]
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                error!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().expect("Failed to get current directory")
            }
        }
    }

    /// Main data directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Database directory (./data/db).
    pub fn db_dir() -> PathBuf {
        Self::data_dir().join("db")
    }

    /// Exported-document directory (./data/exports).
    pub fn exports_dir() -> PathBuf {
        Self::data_dir().join("exports")
    }

    /// Create the directory tree if it does not exist yet.
    pub fn init() -> Result<(), std::io::Error> {
        for dir in [Self::data_dir(), Self::db_dir(), Self::exports_dir()] {
            if !dir.exists() {
                info!("Creating directory: {:?}", dir);
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
