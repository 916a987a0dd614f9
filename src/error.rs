use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while reading or validating the housing dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("dataset {} is missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("column `{column}` in {} is not numeric (found {dtype})", .path.display())]
    NonNumericColumn {
        path: PathBuf,
        column: String,
        dtype: String,
    },
    #[error("column `{column}` in {} has {count} missing value(s)", .path.display())]
    MissingValues {
        path: PathBuf,
        column: String,
        count: usize,
    },
    #[error("dataset {} contains no rows", .path.display())]
    Empty { path: PathBuf },
    #[error("dataframe operation failed: {0}")]
    Frame(#[from] PolarsError),
}

/// Failures while solving for the regression coefficients.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("training partition is empty")]
    NoTrainingRows,
    #[error("expected {expected} feature columns, got {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("feature matrix has {rows} rows but target has {targets} values")]
    LengthMismatch { rows: usize, targets: usize },
    #[error("least-squares solve failed: {0}")]
    Solver(&'static str),
    #[error("least-squares solution is not finite")]
    NonFinite,
}

/// Failures while writing the model artifact.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode artifact {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// Failures while reading a model artifact back.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact {} is corrupt: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
    #[error("artifact {} is not a house price model (magic {found:?})", .path.display())]
    BadMagic { path: PathBuf, found: [u8; 4] },
    #[error(
        "artifact {} has format version {found}, expected {expected}",
        .path.display()
    )]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
}

/// A feature vector did not have exactly one value per model feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} feature values, got {found}")]
pub struct ShapeMismatchError {
    pub expected: usize,
    pub found: usize,
}

/// Umbrella error for the training pipeline and the predictor.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    ArtifactLoad(#[from] ArtifactLoadError),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = DataLoadError::MissingColumn {
            path: PathBuf::from("data/Housing.csv"),
            column: "parking".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dataset data/Housing.csv is missing required column `parking`"
        );
    }

    #[test]
    fn umbrella_is_transparent() {
        let err: Error = ShapeMismatchError {
            expected: 5,
            found: 4,
        }
        .into();
        assert_eq!(err.to_string(), "expected 5 feature values, got 4");
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }
}
