//! Binary persistence for precomputed artifacts.
//!
//! Artifacts are whatever serde type the caller hands in, encoded with
//! bincode. Loading never returns a partially decoded value: either the
//! whole artifact decodes or the call fails.

use crate::error::{DataLoadError, Result};
use crate::parser::open;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Serialize `value` to `path`, creating parent directories as needed
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|source| DataLoadError::Artifact {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush()?;

    debug!("Wrote artifact {:?}", path);
    Ok(())
}

/// Deserialize an artifact previously written with [`write_artifact`]
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(open(path)?);
    let value = bincode::deserialize_from(reader).map_err(|source| DataLoadError::Artifact {
        path: path.display().to_string(),
        source,
    })?;

    debug!("Read artifact {:?}", path);
    Ok(value)
}
