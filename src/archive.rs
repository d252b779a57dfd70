//! On-disk decision archive.
//!
//! Layout: `<root>/<Board> afgørelser/<guid>.txt`. The `.txt` file stems of a
//! board directory are the set of known decisions; there is no manifest.

use crate::decision::Decision;
use crate::error::SyncError;
use std::collections::HashSet;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the board name for its directory
pub const BOARD_DIR_SUFFIX: &str = "afgørelser";

/// Extension of archived records
pub const RECORD_EXTENSION: &str = "txt";

/// Root of the archive
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    /// Open the archive, creating the root directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| SyncError::archive(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the records of `board`
    pub fn board_dir(&self, board: &str) -> PathBuf {
        // A decoded slug may contain separators; keep the board in one directory
        let name = board.replace(['/', '\\'], "-");
        self.root.join(format!("{} {}", name, BOARD_DIR_SUFFIX))
    }

    /// Open (and create) a board directory and read its known identifiers
    pub fn open_board(&self, board: &str) -> Result<BoardDir, SyncError> {
        let path = self.board_dir(board);
        fs::create_dir_all(&path).map_err(|e| SyncError::archive(&path, e))?;
        let known = read_known(&path)?;
        ::log::debug!(
            "Board '{}' has {} archived decisions in {}",
            board,
            known.len(),
            path.display()
        );

        Ok(BoardDir { path, known })
    }
}

/// Identifiers already stored in a board directory
pub fn read_known(dir: &Path) -> Result<HashSet<String>, SyncError> {
    let entries = fs::read_dir(dir).map_err(|e| SyncError::archive(dir, e))?;
    let mut known = HashSet::new();

    for entry in entries {
        let path = entry.map_err(|e| SyncError::archive(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            known.insert(stem.to_string());
        }
    }

    Ok(known)
}

/// An opened board directory with its in-memory known set
#[derive(Debug)]
pub struct BoardDir {
    path: PathBuf,
    known: HashSet<String>,
}

impl BoardDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, guid: &str) -> bool {
        self.known.contains(guid)
    }

    /// Number of decisions known for this board, including ones added this run
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// Path of the record for `guid`
    pub fn record_path(&self, guid: &str) -> PathBuf {
        self.path.join(format!("{}.{}", guid, RECORD_EXTENSION))
    }

    /// Write a decision once.
    ///
    /// Returns `false` without touching the file if a record for the guid
    /// already exists on disk.
    pub fn store(&mut self, decision: &Decision) -> Result<bool, SyncError> {
        let text = decision.as_text();
        self.store_with(&decision.guid, |file| file.write_all(text.as_bytes()))
    }

    /// Stage the record in a scratch file inside the board directory and move
    /// it into place only once it is complete. A failed write leaves no
    /// `.txt` behind, so the guid stays unknown and is fetched again.
    fn store_with<W>(&mut self, guid: &str, write: W) -> Result<bool, SyncError>
    where
        W: FnOnce(&mut fs::File) -> io::Result<()>,
    {
        let path = self.record_path(guid);

        let mut staged = tempfile::Builder::new()
            .prefix(".")
            .suffix(".part")
            .tempfile_in(&self.path)
            .map_err(|e| SyncError::archive(&self.path, e))?;
        write(staged.as_file_mut())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| SyncError::archive(&path, e))?;

        match staged.persist_noclobber(&path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                ::log::warn!("Record {} appeared on disk, leaving it untouched", path.display());
                self.known.insert(guid.to_string());
                return Ok(false);
            }
            Err(e) => return Err(SyncError::archive(&path, e.error)),
        }

        self.known.insert(guid.to_string());
        ::log::debug!("Stored {}", path.display());

        Ok(true)
    }
}
