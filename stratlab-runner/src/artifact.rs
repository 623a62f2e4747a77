//! Pretrained model artifacts.
//!
//! An artifact is a JSON file holding a linear classifier (weights +
//! intercept) and its feature scaler (per-feature mean and standard
//! deviation). Artifacts are loaded eagerly, before the simulation starts:
//! a missing or malformed file fails the run up front, never mid-loop.
//!
//! The loaded model is handed to the engine behind the core
//! `PredictiveModel` trait; the core never sees file paths.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stratlab_core::strategy::{PredictiveModel, FEATURE_COUNT};
use thiserror::Error;

/// Current artifact schema version.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {path}")]
    Missing { path: PathBuf },

    #[error("malformed model artifact {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("model artifact {path} expects {found} features, engine provides {expected}")]
    FeatureMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("unsupported artifact schema version {found} (max supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },
}

/// Serialized classifier + scaler, as written by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub scaler_mean: Vec<f64>,
    pub scaler_std: Vec<f64>,
}

impl ModelArtifact {
    /// Load and validate an artifact. Fail-fast: existence, JSON shape,
    /// schema version, and feature dimensions are all checked here.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&text).map_err(|e| ArtifactError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if artifact.schema_version > ARTIFACT_SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedSchema {
                found: artifact.schema_version,
                supported: ARTIFACT_SCHEMA_VERSION,
            });
        }
        for len in [
            artifact.weights.len(),
            artifact.scaler_mean.len(),
            artifact.scaler_std.len(),
        ] {
            if len != FEATURE_COUNT {
                return Err(ArtifactError::FeatureMismatch {
                    path: path.to_path_buf(),
                    expected: FEATURE_COUNT,
                    found: len,
                });
            }
        }
        Ok(artifact)
    }
}

/// Logistic classifier over scaled features.
#[derive(Debug, Clone)]
pub struct LinearModel {
    artifact: ModelArtifact,
}

impl LinearModel {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Ok(Self::new(ModelArtifact::load(path)?))
    }
}

impl PredictiveModel for LinearModel {
    fn predict(&self, features: &[f64]) -> u8 {
        let a = &self.artifact;
        let z: f64 = features
            .iter()
            .zip(&a.scaler_mean)
            .zip(&a.scaler_std)
            .zip(&a.weights)
            .map(|(((x, mean), std), w)| {
                let scaled = if *std > 0.0 { (x - mean) / std } else { 0.0 };
                scaled * w
            })
            .sum::<f64>()
            + a.intercept;

        let probability = 1.0 / (1.0 + (-z).exp());
        u8::from(probability >= 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_artifact() -> ModelArtifact {
        ModelArtifact {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            weights: vec![1.0; FEATURE_COUNT],
            intercept: 0.0,
            scaler_mean: vec![0.0; FEATURE_COUNT],
            scaler_std: vec![1.0; FEATURE_COUNT],
        }
    }

    fn write_artifact(artifact: &ModelArtifact) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(artifact).unwrap().as_bytes())
            .unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn missing_artifact_fails_fast() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }

    #[test]
    fn malformed_artifact_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        file.flush().unwrap();
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Malformed { .. }));
    }

    #[test]
    fn feature_mismatch_is_rejected() {
        let mut artifact = sample_artifact();
        artifact.weights = vec![1.0; 3];
        let file = write_artifact(&artifact);
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::FeatureMismatch { found: 3, .. }));
    }

    #[test]
    fn future_schema_is_rejected() {
        let mut artifact = sample_artifact();
        artifact.schema_version = ARTIFACT_SCHEMA_VERSION + 1;
        let file = write_artifact(&artifact);
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::UnsupportedSchema { .. }));
    }

    #[test]
    fn valid_artifact_loads_and_predicts() {
        let file = write_artifact(&sample_artifact());
        let model = LinearModel::load(file.path()).unwrap();
        // All-zero scaled features, zero intercept → probability 0.5 → long.
        let features = vec![0.0; FEATURE_COUNT];
        assert_eq!(model.predict(&features), 1);
        // Strongly negative evidence → flat.
        let features = vec![-10.0; FEATURE_COUNT];
        assert_eq!(model.predict(&features), 0);
    }

    #[test]
    fn zero_std_features_are_neutralized() {
        let mut artifact = sample_artifact();
        artifact.scaler_std = vec![0.0; FEATURE_COUNT];
        artifact.intercept = -1.0;
        let model = LinearModel::new(artifact);
        // Every feature collapses to 0; only the intercept decides.
        assert_eq!(model.predict(&vec![5.0; FEATURE_COUNT]), 0);
    }
}
