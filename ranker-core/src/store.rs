use std::{
    fs,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use ranker_state::{AlbumRecord, Draft, RecordId, ValidationError};
use serde::Serialize as _;

/// What went wrong underneath a storage error.
#[derive(Debug, thiserror::Error)]
pub enum StorageFailure {
    /// A filesystem operation on the collection failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The contents were not a valid collection.
    #[error(transparent)]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The draft was rejected; the collection was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The collection file exists but could not be read or parsed.
    #[error("Failed to read collection from {}: {source}", .path.display())]
    Read {
        /// The collection file
        path: PathBuf,
        /// The underlying failure
        source: StorageFailure,
    },
    /// The collection could not be written. The previous file is left as it was.
    #[error("Failed to write collection to {}: {source}", .path.display())]
    Write {
        /// The collection file
        path: PathBuf,
        /// The underlying failure
        source: StorageFailure,
    },
}

/// The rated albums, in the order they were added, backed by a JSON file.
///
/// The file is read once when the store is opened and rewritten in full after
/// every change.
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    records: Vec<AlbumRecord>,
}
impl CollectionStore {
    pub const DEFAULT_FILENAME: &str = "album_data.json";

    /// Open the collection stored at `path`. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = Self::load(&path)?;
        tracing::info!("loaded {} albums from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Read every record stored at `path`.
    ///
    /// Returns an empty collection if nothing has been saved there yet, but
    /// fails if the file exists and cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Vec<AlbumRecord>, StoreError> {
        let read_error = |source: StorageFailure| StoreError::Read {
            path: path.to_path_buf(),
            source,
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no collection at {}, starting empty", path.display());
                return Ok(vec![]);
            }
            Err(e) => return Err(read_error(e.into())),
        };

        serde_json::from_str(&contents).map_err(|e| read_error(e.into()))
    }

    /// Replace everything stored at `path` with `records`.
    ///
    /// Writes to a sibling temporary file and renames it into place, so a
    /// failed save never leaves a half-written collection behind.
    pub fn save(path: &Path, records: &[AlbumRecord]) -> Result<(), StoreError> {
        let temp_path = temp_path_for(path);
        let result = write_atomic(path, &temp_path, records);
        if result.is_err() && temp_path.is_file() {
            let _ = fs::remove_file(&temp_path);
        }
        result.map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("saved {} albums to {}", records.len(), path.display());
        Ok(())
    }

    /// Validate `draft`, give it a fresh ID, append it and save.
    ///
    /// If saving fails, the record is dropped again so that the store keeps
    /// matching what is on disk.
    pub fn add(&mut self, draft: Draft) -> Result<AlbumRecord, StoreError> {
        let record = draft.into_record(self.next_id())?;

        self.records.push(record.clone());
        if let Err(e) = Self::save(&self.path, &self.records) {
            self.records.pop();
            return Err(e);
        }

        tracing::info!(
            "added `{}` by {} ({}) as {}",
            record.title,
            record.artist,
            record.rating,
            record.id
        );
        Ok(record)
    }

    /// Remove the record with the given ID and save.
    ///
    /// Removing an ID that isn't present does nothing and returns `None`.
    pub fn remove(&mut self, id: &RecordId) -> Result<Option<AlbumRecord>, StoreError> {
        let Some(index) = self.records.iter().position(|r| &r.id == id) else {
            tracing::debug!("no album with id {id} to remove");
            return Ok(None);
        };

        let record = self.records.remove(index);
        if let Err(e) = Self::save(&self.path, &self.records) {
            self.records.insert(index, record);
            return Err(e);
        }

        tracing::info!("removed `{}` by {} ({id})", record.title, record.artist);
        Ok(Some(record))
    }

    pub fn records(&self) -> &[AlbumRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A timestamp ID, suffixed if an album was already added within the same microsecond.
    fn next_id(&self) -> RecordId {
        let base = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();
        self.unique_id(base)
    }

    fn unique_id(&self, base: String) -> RecordId {
        let is_taken = |candidate: &str| self.records.iter().any(|r| r.id.as_str() == candidate);
        if !is_taken(&base) {
            return RecordId(base);
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if !is_taken(&candidate) {
                return RecordId(candidate);
            }
            n += 1;
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| CollectionStore::DEFAULT_FILENAME.into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(
    path: &Path,
    temp_path: &Path,
    records: &[AlbumRecord],
) -> Result<(), StorageFailure> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    // Four-space indentation and no trailing newline, as `album_data.json`
    // has always been written.
    let mut writer = BufWriter::new(fs::File::create(temp_path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    records.serialize(&mut serde_json::Serializer::with_formatter(&mut writer, formatter))?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)?;
    Ok(())
}
