//! Training configuration, read from the environment with fixed defaults.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATASET_PATH: &str = "Housing.csv";
pub const DEFAULT_ARTIFACT_PATH: &str = "house_model.bin";
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

pub const DATASET_ENV: &str = "HOUSE_DATASET";
pub const ARTIFACT_ENV: &str = "HOUSE_MODEL";
pub const TEST_FRACTION_ENV: &str = "HOUSE_TEST_FRACTION";
pub const SEED_ENV: &str = "HOUSE_SEED";

/// Inputs of a single training run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    pub dataset_path: PathBuf,
    pub artifact_path: PathBuf,
    /// Share of rows held out for evaluation, in `[0, 1)`.
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainConfig {
    /// Snapshot of the process environment layered over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let test_fraction = match lookup(TEST_FRACTION_ENV) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if (0.0..1.0).contains(&v) => v,
                _ => {
                    log::warn!(
                        "ignoring {TEST_FRACTION_ENV}={raw:?}, using {}",
                        defaults.test_fraction
                    );
                    defaults.test_fraction
                }
            },
            None => defaults.test_fraction,
        };

        let seed = match lookup(SEED_ENV) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("ignoring {SEED_ENV}={raw:?}, using {}", defaults.seed);
                defaults.seed
            }),
            None => defaults.seed,
        };

        Self {
            dataset_path: lookup(DATASET_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            artifact_path: lookup(ARTIFACT_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.artifact_path),
            test_fraction,
            seed,
        }
    }
}

/// Artifact location used by the prediction side.
pub fn artifact_path_from_env() -> PathBuf {
    env::var(ARTIFACT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = TrainConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, TrainConfig::default());
        assert_eq!(cfg.seed, 42);
        assert!((cfg.test_fraction - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = TrainConfig::from_lookup(lookup_from(&[
            (DATASET_ENV, "/data/houses.csv"),
            (ARTIFACT_ENV, "/models/out.bin"),
            (TEST_FRACTION_ENV, "0.25"),
            (SEED_ENV, "7"),
        ]));
        assert_eq!(cfg.dataset_path, PathBuf::from("/data/houses.csv"));
        assert_eq!(cfg.artifact_path, PathBuf::from("/models/out.bin"));
        assert!((cfg.test_fraction - 0.25).abs() < f64::EPSILON);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = TrainConfig::from_lookup(lookup_from(&[
            (TEST_FRACTION_ENV, "1.5"),
            (SEED_ENV, "forty-two"),
        ]));
        assert!((cfg.test_fraction - DEFAULT_TEST_FRACTION).abs() < f64::EPSILON);
        assert_eq!(cfg.seed, DEFAULT_SEED);
    }
}
