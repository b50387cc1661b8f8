use std::fs;
use std::path::{Path, PathBuf};
use ts_tilemap::{TilesetDefinition, TilesetError};

/// Default directory for tileset files.
pub const TILESETS_DIR: &str = "assets/tilesets";

/// Error type for tileset I/O operations. File errors carry the path involved.
#[derive(Debug)]
pub enum TilesetIoError {
    Read { path: PathBuf, source: std::io::Error },
    Write { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: ron::error::SpannedError },
    Serialize(ron::Error),
    /// The file parsed, but its overrides select tile types it does not have.
    Invalid { path: PathBuf, source: TilesetError },
}

impl std::fmt::Display for TilesetIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            Self::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "{} is not a tileset: {}", path.display(), source)
            }
            Self::Serialize(e) => write!(f, "cannot encode tileset: {}", e),
            Self::Invalid { path, source } => {
                write!(f, "invalid tileset {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for TilesetIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
            Self::Invalid { source, .. } => Some(source),
        }
    }
}

/// Save a tileset definition to a RON file. Invalid definitions are not written.
pub fn save_tileset(path: &Path, tileset: &TilesetDefinition) -> Result<(), TilesetIoError> {
    tileset.validate().map_err(|source| TilesetIoError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    let pretty_config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .separate_tuple_members(true);
    let ron_string =
        ron::ser::to_string_pretty(tileset, pretty_config).map_err(TilesetIoError::Serialize)?;

    fs::write(path, ron_string).map_err(|source| TilesetIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a tileset definition from a RON file and check its overrides.
pub fn load_tileset(path: &Path) -> Result<TilesetDefinition, TilesetIoError> {
    let contents = fs::read_to_string(path).map_err(|source| TilesetIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tileset: TilesetDefinition =
        ron::from_str(&contents).map_err(|source| TilesetIoError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tileset.validate().map_err(|source| TilesetIoError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tileset)
}

/// Create the tilesets directory if needed and return it.
pub fn ensure_tilesets_dir() -> Result<PathBuf, TilesetIoError> {
    let dir = PathBuf::from(TILESETS_DIR);
    fs::create_dir_all(&dir).map_err(|source| TilesetIoError::Write {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// File name for a tileset: lower-case, runs of other characters folded to one
/// `_`, falling back to `tileset.ron` when nothing usable is left.
pub fn tileset_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '-' {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        "tileset.ron".to_string()
    } else {
        format!("{}.ron", stem)
    }
}
