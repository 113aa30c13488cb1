use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use super::error::*;

/// Writes `contents` next to `filepath` and then renames it into place.
pub async fn write_atomic_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let filepath = filepath.as_ref();

    if let Some(dir) = filepath.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .await
            .map_err(|source| Error::CreateDir {
                path: dir.to_owned(),
                source,
            })?;
    }

    let tmp = {
        let mut name = filepath.file_name().unwrap_or_default().to_owned();
        name.push(".tmp");
        filepath.with_file_name(name)
    };
    fs::write(&tmp, contents)
        .await
        .map_err(|source| Error::Stage {
            path: tmp.clone(),
            source,
        })?;
    fs::rename(&tmp, filepath)
        .await
        .map_err(|source| Error::Replace {
            path: filepath.to_owned(),
            source,
        })
}

/// Reads the whole file, or `None` if it does not exist.
pub async fn read_to_string_if_exists(filepath: impl AsRef<Path>) -> Result<Option<String>> {
    let filepath = filepath.as_ref();
    match fs::read_to_string(filepath).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: filepath.to_owned(),
            source,
        }),
    }
}

/// JSON document living in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileDriver {
    pub filepath: PathBuf,
}

impl JsonFileDriver {
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            filepath: filepath.as_ref().to_owned(),
        }
    }

    /// Loads the document, falling back to `T::default()` when the file is absent.
    pub async fn load_or_default<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(json) = read_to_string_if_exists(&self.filepath).await? else {
            return Ok(T::default());
        };
        serde_json::from_str(&json).map_err(|source| Error::Corrupt {
            path: self.filepath.clone(),
            source,
        })
    }

    pub async fn save<T: Serialize>(&self, doc: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(doc).map_err(|source| Error::Encode {
            path: self.filepath.clone(),
            source,
        })?;
        write_atomic_with_mkdir(&self.filepath, json).await
    }
}
