use std::path::PathBuf;
use std::time::Instant;

use polars::prelude::DataFrame;

use crate::artifact;
use crate::config::TrainConfig;
use crate::dataset::{self, DatasetSummary, SplitData};
use crate::error::Result;
use crate::metrics::{self, Evaluation};
use crate::model::{self, LinearModel};

/// Everything a training run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub summary: DatasetSummary,
    pub train_rows: usize,
    pub test_rows: usize,
    pub model: LinearModel,
    /// `None` when the split left no rows to test on.
    pub evaluation: Option<Evaluation>,
    pub artifact_path: PathBuf,
}

/// load → split → fit → evaluate → persist
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainConfig,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn load_and_split(&self) -> Result<SplitData> {
        let (_, split) = self.load_frame_and_split()?;
        Ok(split)
    }

    /// Shared by [`Trainer::load_and_split`] and [`Trainer::run`]; the frame
    /// is kept for the dataset summary.
    fn load_frame_and_split(&self) -> Result<(DataFrame, SplitData)> {
        let df = dataset::load_dataset(&self.config.dataset_path)?;
        let split = dataset::split_frame(&df, self.config.test_fraction, self.config.seed)?;
        Ok((df, split))
    }

    pub fn fit(&self, split: &SplitData) -> Result<LinearModel> {
        let model = model::fit(&split.train.features, &split.train.target)?;
        log::info!(
            "fitted on {} rows: weights {:?}, intercept {}",
            split.train.len(),
            model.weights,
            model.intercept
        );
        Ok(model)
    }

    /// Scores the held-out rows. Diagnostic only.
    pub fn evaluate(&self, model: &LinearModel, split: &SplitData) -> Option<Evaluation> {
        let y_pred = model.predict_batch(&split.test.features);
        let evaluation = metrics::evaluate(&split.test.target, &y_pred);

        match &evaluation {
            Some(e) => log::info!("test rows {}: R2 {} MSE {}", e.rows, e.r2, e.mse),
            None => log::warn!("test partition is empty, skipping evaluation"),
        }
        evaluation
    }

    pub fn persist(&self, model: &LinearModel) -> Result<()> {
        artifact::persist(model, &self.config.artifact_path)?;
        Ok(())
    }

    /// Runs the whole pipeline. The artifact is written whatever the scores
    /// are, and not at all if an earlier stage fails.
    pub fn run(&self) -> Result<TrainingReport> {
        let started = Instant::now();
        log::info!(
            "training from {} (test fraction {}, seed {})",
            self.config.dataset_path.display(),
            self.config.test_fraction,
            self.config.seed
        );

        let (df, split) = self.load_frame_and_split()?;
        let summary = dataset::summarize(&df)?;

        let model = self.fit(&split)?;
        let evaluation = self.evaluate(&model, &split);
        self.persist(&model)?;

        log::info!("training finished in {:?}", started.elapsed());

        Ok(TrainingReport {
            summary,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            model,
            evaluation,
            artifact_path: self.config.artifact_path.clone(),
        })
    }
}
