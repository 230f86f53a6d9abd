use std::{env, io, path::PathBuf};

use anyhow::Result;

const APPLICATION_DIR: &str = "appstreak";

/// Directory holding the snapshot and logs when `--dir` isn't given.
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = platform_state_dir();
    path.push(APPLICATION_DIR);
    create_application_path(path)
}

pub fn create_application_path(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

fn platform_state_dir() -> PathBuf {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            PathBuf::from(env::var("APPDATA").expect("APPDATA should be present on Windows"))
        } else {
            env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .expect("Couldn't find neither XDG_STATE_HOME nor HOME")
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::create_application_path;

    #[test]
    fn creates_nested_directory_and_tolerates_existing() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a/b/appstreak");
        assert_eq!(create_application_path(nested.clone())?, nested);
        assert!(nested.is_dir());
        assert_eq!(create_application_path(nested.clone())?, nested);
        Ok(())
    }
}
