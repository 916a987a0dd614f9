//! Linear house price model: a training pipeline that fits five numeric
//! features to the sale price and writes the fit to a small binary artifact,
//! and a predictor that reads the artifact back and scores single houses.

pub mod artifact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod trainer;

pub use config::TrainConfig;
pub use dataset::{
    load_and_split, load_dataset, split_features_and_target, summarize, train_test_split,
    DatasetSummary, Partition, SplitData, FEATURE_COLUMNS, TARGET_COLUMN,
};
pub use error::{
    ArtifactLoadError, DataLoadError, Error, FitError, PersistError, Result, ShapeMismatchError,
};
pub use metrics::Evaluation;
pub use model::{fit, FeatureVector, LinearModel, N_FEATURES};
pub use predictor::{format_price, Predictor};
pub use trainer::{Trainer, TrainingReport};
