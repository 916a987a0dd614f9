use std::path::Path;

use ndarray::{Array1, Array2};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::DataLoadError;

/// Model inputs, in the order the learned weights are bound to.
pub const FEATURE_COLUMNS: [&str; 5] = ["area", "bedrooms", "bathrooms", "stories", "parking"];

/// Regression label.
pub const TARGET_COLUMN: &str = "price";

/// Feature matrix and target vector for one side of the split.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// One row per house, columns in `FEATURE_COLUMNS` order.
    pub features: Array2<f64>,
    pub target: Array1<f64>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Train and test partitions plus the dataset row indices each was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    pub train: Partition,
    pub test: Partition,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Headline numbers for a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub mean_price: f64,
    pub mean_area: f64,
}

/// Read the CSV at `path` and check the columns the model needs.
///
/// Extra columns are kept in the frame but never used by the model.
pub fn load_dataset(path: &Path) -> Result<DataFrame, DataLoadError> {
    let read_err = |source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let df = CsvReader::from_path(path)
        .map_err(read_err)?
        .has_header(true)
        .finish()
        .map_err(read_err)?;

    log::info!(
        "loaded {} rows and {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    if df.height() == 0 {
        return Err(DataLoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    for name in FEATURE_COLUMNS.iter().chain(std::iter::once(&TARGET_COLUMN)) {
        let column = df
            .column(name)
            .map_err(|_| DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })?;

        if !column.dtype().is_numeric() {
            return Err(DataLoadError::NonNumericColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }

        let nulls = column.null_count();
        if nulls > 0 {
            return Err(DataLoadError::MissingValues {
                path: path.to_path_buf(),
                column: name.to_string(),
                count: nulls,
            });
        }
    }

    Ok(df)
}

/// Number of rows held out for a dataset of `rows` rows.
pub fn test_rows_for(rows: usize, test_fraction: f64) -> usize {
    let n_test = (rows as f64 * test_fraction).round();
    if n_test <= 0.0 {
        0
    } else {
        (n_test as usize).min(rows)
    }
}

/// Seeded shuffle of the row indices; the first part trains, the tail tests.
///
/// Returns `(train_df, test_df, train_indices, test_indices)`.
pub fn train_test_split(
    df: &DataFrame,
    test_fraction: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame, Vec<usize>, Vec<usize>), DataLoadError> {
    let mut indices: Vec<usize> = (0..df.height()).collect();

    // same seed, same permutation
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = test_rows_for(df.height(), test_fraction);
    let split_idx = df.height() - n_test;

    let train_indices = indices[..split_idx].to_vec();
    let test_indices = indices[split_idx..].to_vec();

    let train_df = df.take(&to_idx_ca(&train_indices))?;
    let test_df = df.take(&to_idx_ca(&test_indices))?;

    log::debug!(
        "split {} rows into {} train / {} test (seed {seed})",
        df.height(),
        train_indices.len(),
        test_indices.len()
    );

    Ok((train_df, test_df, train_indices, test_indices))
}

fn to_idx_ca(indices: &[usize]) -> IdxCa {
    IdxCa::from_vec("", indices.iter().map(|&i| i as IdxSize).collect())
}

/// Pull the model inputs and the label out of a frame as `f64` arrays.
pub fn split_features_and_target(df: &DataFrame) -> Result<Partition, DataLoadError> {
    let features = df
        .select(FEATURE_COLUMNS)?
        .to_ndarray::<Float64Type>(IndexOrder::C)?;

    // single column frame, so column 0 is the label
    let target = df
        .select([TARGET_COLUMN])?
        .to_ndarray::<Float64Type>(IndexOrder::C)?
        .column(0)
        .to_owned();

    Ok(Partition { features, target })
}

/// Load, validate, split and convert in one step.
pub fn load_and_split(
    path: &Path,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData, DataLoadError> {
    let df = load_dataset(path)?;
    split_frame(&df, test_fraction, seed)
}

/// Split an already loaded frame.
pub fn split_frame(
    df: &DataFrame,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData, DataLoadError> {
    let (train_df, test_df, train_indices, test_indices) =
        train_test_split(df, test_fraction, seed)?;

    Ok(SplitData {
        train: split_features_and_target(&train_df)?,
        test: split_features_and_target(&test_df)?,
        train_indices,
        test_indices,
    })
}

/// Row count plus the average price and area.
pub fn summarize(df: &DataFrame) -> Result<DatasetSummary, DataLoadError> {
    let mean_price = df.column(TARGET_COLUMN)?.mean().unwrap_or(f64::NAN);
    let mean_area = df.column(FEATURE_COLUMNS[0])?.mean().unwrap_or(f64::NAN);

    Ok(DatasetSummary {
        rows: df.height(),
        mean_price,
        mean_area,
    })
}
