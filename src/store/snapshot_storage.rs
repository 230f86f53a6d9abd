use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Result};
use chrono::Utc;
use fs4::tokio::AsyncFileExt;
use tokio::fs::File;
use tracing::{debug, warn};

use crate::fs::operations::write_atomically;

const SNAPSHOT_FILE: &str = "applications.json";
const LOCK_FILE: &str = "applications.lock";
/// Snapshots that couldn't be loaded are kept as `applications.json.corrupt-<millis>`.
pub const SET_ASIDE_INFIX: &str = ".corrupt-";

/// Interface for abstracting persistence of the whole application list. The store never persists
/// a single record, it always hands over the complete serialized snapshot.
pub trait SnapshotStorage {
    /// Returns the last written snapshot or [None] if nothing was ever written.
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>>;

    /// Replaces the stored snapshot with `blob`.
    fn write(&self, blob: &[u8]) -> impl Future<Output = Result<()>>;

    /// Moves the current snapshot out of the way without destroying it. Called before the first
    /// write that would replace a snapshot which couldn't be loaded.
    fn set_aside(&self) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> SnapshotStorage for T
where
    T::Target: SnapshotStorage,
{
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>>> {
        self.deref().read()
    }

    fn write(&self, blob: &[u8]) -> impl Future<Output = Result<()>> {
        self.deref().write(blob)
    }

    fn set_aside(&self) -> impl Future<Output = Result<()>> {
        self.deref().set_aside()
    }
}

/// The main realization of [SnapshotStorage]. Keeps the snapshot in a single json file inside
/// the application directory.
pub struct FileSnapshotStorage {
    dir: PathBuf,
}

impl FileSnapshotStorage {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    /// Blocks until no other process holds the lock. Mutating commands hold it from loading the
    /// snapshot until the rewritten snapshot is persisted, so that concurrent invocations can't
    /// lose each other's updates.
    pub async fn lock_exclusive(&self) -> Result<SnapshotLock> {
        SnapshotLock::acquire(&self.dir.join(LOCK_FILE)).await
    }
}

impl SnapshotStorage for FileSnapshotStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        let path = self.snapshot_path();
        debug!("Reading snapshot {path:?}");
        match tokio::fs::read(&path).await {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, blob: &[u8]) -> Result<()> {
        let path = self.snapshot_path();
        debug!("Writing {} bytes into {path:?}", blob.len());
        write_atomically(&path, blob).await
    }

    async fn set_aside(&self) -> Result<()> {
        let path = self.snapshot_path();
        let target = self.dir.join(format!(
            "{SNAPSHOT_FILE}{SET_ASIDE_INFIX}{}",
            Utc::now().timestamp_millis()
        ));
        match tokio::fs::rename(&path, &target).await {
            Ok(_) => {
                warn!("Moved unreadable snapshot {path:?} to {target:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Exclusive advisory lock over the snapshot. Released by [SnapshotLock::release] or when dropped.
pub struct SnapshotLock {
    file: File,
}

impl SnapshotLock {
    async fn acquire(path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .await?;
        file.lock_exclusive()?;
        debug!("Acquired lock {path:?}");
        Ok(Self { file })
    }

    pub async fn release(self) -> Result<()> {
        self.file.unlock_async().await?;
        Ok(())
    }
}

/// Keeps the snapshot in memory. Useful for tests and for embedding the store without a disk.
#[derive(Default)]
pub struct MemorySnapshotStorage {
    blob: Mutex<Option<Vec<u8>>>,
    set_aside: Mutex<Vec<Vec<u8>>>,
}

impl MemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            ..Default::default()
        }
    }

    /// Snapshots moved away by [SnapshotStorage::set_aside], oldest first.
    pub fn set_aside_blobs(&self) -> Result<Vec<Vec<u8>>> {
        let set_aside = self
            .set_aside
            .lock()
            .map_err(|e| anyhow!("Snapshot mutex poisoned {e}"))?;
        Ok(set_aside.clone())
    }
}

impl SnapshotStorage for MemorySnapshotStorage {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        let blob = self
            .blob
            .lock()
            .map_err(|e| anyhow!("Snapshot mutex poisoned {e}"))?;
        Ok(blob.clone())
    }

    async fn write(&self, blob: &[u8]) -> Result<()> {
        let mut current = self
            .blob
            .lock()
            .map_err(|e| anyhow!("Snapshot mutex poisoned {e}"))?;
        *current = Some(blob.to_vec());
        Ok(())
    }

    async fn set_aside(&self) -> Result<()> {
        let mut current = self
            .blob
            .lock()
            .map_err(|e| anyhow!("Snapshot mutex poisoned {e}"))?;
        if let Some(blob) = current.take() {
            self.set_aside
                .lock()
                .map_err(|e| anyhow!("Snapshot mutex poisoned {e}"))?
                .push(blob);
        }
        Ok(())
    }
}
