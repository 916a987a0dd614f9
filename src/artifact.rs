//! On-disk form of a fitted [`LinearModel`].
//!
//! The file is a bincode record with fixed-width little-endian integers:
//! a four byte magic, a format version, then the weights and intercept.
//! The header is decoded first so a file from another format version is
//! reported as such instead of as corrupt.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactLoadError, PersistError};
use crate::model::LinearModel;

pub const MAGIC: [u8; 4] = *b"HPLR";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct ArtifactFile {
    magic: [u8; 4],
    version: u32,
    model: LinearModel,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

/// Write `model` to `path`, replacing whatever is there.
///
/// The record goes to a sibling `.tmp` file first and is renamed over
/// `path` only once it is fully on disk, so a failed write leaves the
/// previous artifact untouched.
pub fn persist(model: &LinearModel, path: &Path) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let record = ArtifactFile {
        magic: MAGIC,
        version: FORMAT_VERSION,
        model: *model,
    };

    let tmp_path = staging_path(path);
    let written = write_record(&record, &tmp_path)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(io_err));
    if written.is_err() {
        // leftover staging file from a failed write
        fs::remove_file(&tmp_path).ok();
    }
    written?;

    log::info!("model artifact written to {}", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_record(record: &ArtifactFile, tmp_path: &Path) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: tmp_path.to_path_buf(),
        source,
    };

    let file = File::create(tmp_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    codec()
        .serialize_into(&mut writer, record)
        .map_err(|source| PersistError::Encode {
            path: tmp_path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_err)?;
    writer.get_ref().sync_all().map_err(io_err)?;
    Ok(())
}

/// Read a model back from `path`.
pub fn load(path: &Path) -> Result<LinearModel, ArtifactLoadError> {
    let bytes = fs::read(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_err = |source| ArtifactLoadError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let header: Header = codec()
        .allow_trailing_bytes()
        .deserialize(&bytes)
        .map_err(decode_err)?;
    if header.magic != MAGIC {
        return Err(ArtifactLoadError::BadMagic {
            path: path.to_path_buf(),
            found: header.magic,
        });
    }
    if header.version != FORMAT_VERSION {
        return Err(ArtifactLoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.version,
            expected: FORMAT_VERSION,
        });
    }

    let record: ArtifactFile = codec().deserialize(&bytes).map_err(decode_err)?;
    log::debug!("model artifact read from {}", path.display());
    Ok(record.model)
}
