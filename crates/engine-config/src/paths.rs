use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "KBC_DATADIR";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const OUTPUT_FILE_NAME: &str = "sales_summary.csv";

/// Layout of the component's data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    /// Explicit path first, then the environment value, then `./data`.
    pub fn resolve(explicit: Option<&Path>, env_value: Option<&str>) -> Self {
        if let Some(path) = explicit {
            return DataDir::new(path);
        }
        match env_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => DataDir::new(value),
            None => DataDir::new(DEFAULT_DATA_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn tables_out_dir(&self) -> PathBuf {
        self.root.join("out").join("tables")
    }
}
