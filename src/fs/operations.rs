use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::{fs::File, io::AsyncWriteExt};

/// Replaces the contents of `path` with `data` as a whole. Data is first written into a sibling
/// temporary file which is then renamed over `path`, so readers observe either the previous
/// contents or the new ones and never a partially written file.
pub async fn write_atomically(path: &Path, data: &[u8]) -> Result<()> {
    let temporary = temporary_sibling(path);

    let mut file = File::create(&temporary).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = tokio::fs::rename(&temporary, path).await {
        // Leftover temporary file is harmless, but there is no reason to keep it around.
        let _ = tokio::fs::remove_file(&temporary).await;
        return Err(e.into());
    }
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::fs::operations::{temporary_sibling, write_atomically};

    #[tokio::test]
    async fn test_write_atomically_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("snapshot.json");

        write_atomically(&path, b"[1,2,3]").await?;

        assert_eq!(tokio::fs::read(&path).await?, b"[1,2,3]");
        assert!(!temporary_sibling(&path).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_atomically_replaces_longer_contents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("snapshot.json");

        write_atomically(&path, b"a much longer previous value").await?;
        write_atomically(&path, b"short").await?;

        assert_eq!(tokio::fs::read_to_string(&path).await?, "short");
        Ok(())
    }

    #[tokio::test]
    async fn test_write_atomically_missing_directory() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("snapshot.json");

        assert!(write_atomically(&path, b"[]").await.is_err());
        assert!(!path.exists());
        Ok(())
    }
}
