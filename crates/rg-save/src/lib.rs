//! rg-save: Save/restore of generated levels
//!
//! A save file is JSON: a versioned header, the config that produced the
//! level, and the level itself. Files may be gzip-compressed; loading
//! detects compression from the first bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rg_core::{GenConfig, GeneratedLevel};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Leading bytes of a gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,

    #[error("Save file corrupted: {0}")]
    Corrupted(String),
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Seed the level was generated from, if known
    pub seed: Option<u64>,
    pub width: usize,
    pub height: usize,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "RGLV";

    pub fn new(level: &GeneratedLevel, seed: Option<u64>) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            seed,
            width: level.grid.width(),
            height: level.grid.height(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub config: GenConfig,
    pub level: GeneratedLevel,
}

impl SaveFile {
    pub fn new(level: GeneratedLevel, config: GenConfig, seed: Option<u64>) -> Self {
        Self {
            header: SaveHeader::new(&level, seed),
            config,
            level,
        }
    }

    /// Check the header and that it agrees with the stored grid
    pub fn validate(&self) -> Result<(), SaveError> {
        self.header.validate()?;
        if self.header.width != self.level.grid.width()
            || self.header.height != self.level.grid.height()
        {
            return Err(SaveError::Corrupted(format!(
                "header says {}x{}, grid is {}x{}",
                self.header.width,
                self.header.height,
                self.level.grid.width(),
                self.level.grid.height()
            )));
        }
        Ok(())
    }
}

/// Save a level as pretty-printed JSON
pub fn save_level(
    path: impl AsRef<Path>,
    level: &GeneratedLevel,
    config: &GenConfig,
    seed: Option<u64>,
) -> Result<(), SaveError> {
    let save_file = SaveFile::new(level.clone(), config.clone(), seed);
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &save_file)?;
    debug!(path = %path.as_ref().display(), "level saved");
    Ok(())
}

/// Save a level as gzip-compressed compact JSON
pub fn save_level_compressed(
    path: impl AsRef<Path>,
    level: &GeneratedLevel,
    config: &GenConfig,
    seed: Option<u64>,
) -> Result<(), SaveError> {
    let save_file = SaveFile::new(level.clone(), config.clone(), seed);
    let file = File::create(path.as_ref())?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, &save_file)?;
    encoder.finish()?.flush()?;
    debug!(path = %path.as_ref().display(), "level saved (compressed)");
    Ok(())
}

/// Read a save file, decompressing it if needed
fn read_save_file(path: &Path) -> Result<SaveFile, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes)?;

    let save_file: SaveFile = if bytes.starts_with(&GZIP_MAGIC) {
        serde_json::from_reader(GzDecoder::new(bytes.as_slice()))?
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(save_file)
}

/// Load a save file and validate it
pub fn load_save(path: impl AsRef<Path>) -> Result<SaveFile, SaveError> {
    let save_file = read_save_file(path.as_ref())?;
    save_file.validate()?;
    debug!(path = %path.as_ref().display(), "level loaded");
    Ok(save_file)
}

/// Load only the level from a save file
pub fn load_level(path: impl AsRef<Path>) -> Result<GeneratedLevel, SaveError> {
    Ok(load_save(path)?.level)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let save_file = read_save_file(path.as_ref())?;
    save_file.header.validate()?;
    Ok(save_file.header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Get the default save path for a save name
pub fn default_save_path(name: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("roguegen");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_core::generate_level_seeded;

    fn sample() -> (GeneratedLevel, GenConfig, u64) {
        let config = GenConfig::new(40, 24);
        (0..20)
            .find_map(|seed| {
                generate_level_seeded(&config, seed)
                    .ok()
                    .map(|level| (level, config.clone(), seed))
            })
            .unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("roguegen_test_save.json");
        let (level, config, seed) = sample();

        save_level(&path, &level, &config, Some(seed)).unwrap();
        assert!(save_exists(&path));

        let loaded = load_save(&path).unwrap();
        assert_eq!(loaded.level, level);
        assert_eq!(loaded.config, config);
        assert_eq!(loaded.header.seed, Some(seed));

        delete_save(&path).unwrap();
        assert!(!save_exists(&path));
    }

    #[test]
    fn test_compressed_round_trip() {
        let path = std::env::temp_dir().join("roguegen_test_save.json.gz");
        let (level, config, seed) = sample();

        save_level_compressed(&path, &level, &config, Some(seed)).unwrap();
        let raw = std::fs::read(&path).unwrap();
        assert!(raw.starts_with(&GZIP_MAGIC));

        assert_eq!(load_level(&path).unwrap(), level);
        assert_eq!(load_header(&path).unwrap().width, 40);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_header_validation() {
        let (level, _, _) = sample();
        let header = SaveHeader::new(&level, None);

        assert!(header.validate().is_ok());

        let mut bad_header = header.clone();
        bad_header.magic = "XXXX".to_string();
        assert!(matches!(
            bad_header.validate(),
            Err(SaveError::InvalidHeader)
        ));

        let mut old_header = header;
        old_header.version = 999;
        assert!(matches!(
            old_header.validate(),
            Err(SaveError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn test_size_mismatch_is_corruption() {
        let (level, config, _) = sample();
        let mut save_file = SaveFile::new(level, config, None);
        save_file.header.width += 1;
        assert!(matches!(save_file.validate(), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_truncated_grid_is_rejected() {
        let path = std::env::temp_dir().join("roguegen_test_truncated_grid.json");
        let (level, config, seed) = sample();
        save_level(&path, &level, &config, Some(seed)).unwrap();

        let mut raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        raw["level"]["grid"]["cells"] = serde_json::json!([]);
        std::fs::write(&path, serde_json::to_vec(&raw).unwrap()).unwrap();

        let result = load_save(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SaveError::Serialization(_))));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_level("/nonexistent/path/save.json");
        assert!(matches!(result, Err(SaveError::NotFound)));
    }
}
