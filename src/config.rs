//! Command-line configuration

use std::path::{Path, PathBuf};

use clap::Parser;

/// File name the extraction step writes the charm tables to
pub const DEFAULT_DATA_FILE: &str = "extracted_data.json";

/// Default log destination; logging to the terminal would corrupt the UI
pub const DEFAULT_LOG_FILE: &str = "charm-checker.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "charm-checker")]
#[command(version, about = "Find which charm slot combinations grant the skills you want")]
pub struct Cli {
    /// Charm dataset (JSON). Defaults to extracted_data.json next to the
    /// executable, then in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Rarity tier to open with (defaults to the lowest tier)
    #[arg(short, long, value_name = "TIER")]
    pub rarity: Option<u32>,

    /// Where to write the log (filter with RUST_LOG)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Cli {
    /// Dataset path to load
    pub fn data_path(&self) -> PathBuf {
        match &self.data {
            Some(path) => path.clone(),
            None => {
                let exe_dir = std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf));
                resolve_data_path(exe_dir.as_deref())
            }
        }
    }
}

/// Prefer the dataset bundled beside the executable, else the working directory
pub fn resolve_data_path(exe_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = exe_dir {
        let candidate = dir.join(DEFAULT_DATA_FILE);
        if candidate.exists() {
            return candidate;
        }
    }
    PathBuf::from(DEFAULT_DATA_FILE)
}
