//! The model registry: one externally trained artifact per horizon, loaded
//! once at startup and shared read-only for the process lifetime.

use crate::artifact::{CategoricalEncoder, FeatureSchema, HorizonArtifact, RegressionModel};
use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use crate::horizon::Horizon;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Holds the three horizon artifacts and exposes a uniform predict
/// operation. A horizon whose artifact failed to load stays empty and every
/// later call for it fails with [`ForecastError::ModelUnavailable`]; nothing
/// degrades silently.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    daily: Option<HorizonArtifact>,
    weekly: Option<HorizonArtifact>,
    monthly: Option<HorizonArtifact>,
}

impl ModelRegistry {
    /// Registry with no artifacts loaded. Useful as a base for
    /// [`with_artifact`](Self::with_artifact) in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load all three horizons from `dir` for the given store.
    ///
    /// Expects, per horizon, files named
    /// `{horizon}_store_{store_id}_model.json`,
    /// `{horizon}_store_{store_id}_features.json`, and optionally
    /// `{horizon}_store_{store_id}_encoder.json`. A missing or corrupt
    /// model/schema file is logged and leaves that horizon unloaded; this
    /// never fails the process.
    pub fn load(dir: &Path, store_id: u32) -> Self {
        let mut registry = Self::empty();
        for horizon in Horizon::ALL {
            *registry.slot_mut(horizon) = load_horizon(dir, horizon, store_id);
        }
        registry
    }

    /// Install an artifact for one horizon, replacing whatever was there.
    pub fn with_artifact(mut self, horizon: Horizon, artifact: HorizonArtifact) -> Self {
        *self.slot_mut(horizon) = Some(artifact);
        self
    }

    /// Whether the horizon's artifact loaded completely.
    pub fn is_loaded(&self, horizon: Horizon) -> bool {
        self.slot(horizon).is_some()
    }

    /// The artifact for a horizon, or [`ForecastError::ModelUnavailable`]
    /// when it never loaded.
    pub fn artifact(&self, horizon: Horizon) -> Result<&HorizonArtifact> {
        self.slot(horizon)
            .ok_or(ForecastError::ModelUnavailable(horizon))
    }

    /// Run the horizon's model over aligned feature vectors, one prediction
    /// per vector in input order, clamped to ≥ 0 — a sales count cannot be
    /// negative.
    pub fn predict(&self, horizon: Horizon, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        let artifact = self.artifact(horizon)?;
        let width = artifact.schema.width();

        vectors
            .iter()
            .map(|v| {
                if v.values.len() != width {
                    return Err(ForecastError::Computation(format!(
                        "Feature vector has {} values but the {} schema has {} columns",
                        v.values.len(),
                        horizon,
                        width
                    )));
                }
                Ok(artifact.model.predict(&v.values).max(0.0))
            })
            .collect()
    }

    fn slot(&self, horizon: Horizon) -> Option<&HorizonArtifact> {
        match horizon {
            Horizon::Daily => self.daily.as_ref(),
            Horizon::Weekly => self.weekly.as_ref(),
            Horizon::Monthly => self.monthly.as_ref(),
        }
    }

    fn slot_mut(&mut self, horizon: Horizon) -> &mut Option<HorizonArtifact> {
        match horizon {
            Horizon::Daily => &mut self.daily,
            Horizon::Weekly => &mut self.weekly,
            Horizon::Monthly => &mut self.monthly,
        }
    }
}

fn artifact_path(dir: &Path, horizon: Horizon, store_id: u32, part: &str) -> PathBuf {
    dir.join(format!("{}_store_{}_{}.json", horizon, store_id, part))
}

fn load_horizon(dir: &Path, horizon: Horizon, store_id: u32) -> Option<HorizonArtifact> {
    let model_path = artifact_path(dir, horizon, store_id, "model");
    let model = match RegressionModel::from_json_file(&model_path) {
        Ok(model) => model,
        Err(e) => {
            warn!(
                horizon = %horizon,
                path = %model_path.display(),
                error = %e,
                "model file not loaded"
            );
            return None;
        }
    };

    let features_path = artifact_path(dir, horizon, store_id, "features");
    let schema = match FeatureSchema::from_json_file(&features_path) {
        Ok(schema) => schema,
        Err(e) => {
            warn!(
                horizon = %horizon,
                path = %features_path.display(),
                error = %e,
                "features file not loaded"
            );
            return None;
        }
    };

    // The encoder is optional; a horizon trained without categorical
    // encoding simply has no encoder file.
    let encoder_path = artifact_path(dir, horizon, store_id, "encoder");
    let encoder = if encoder_path.exists() {
        match CategoricalEncoder::from_json_file(&encoder_path) {
            Ok(encoder) => Some(encoder),
            Err(e) => {
                warn!(
                    horizon = %horizon,
                    path = %encoder_path.display(),
                    error = %e,
                    "encoder file not loaded"
                );
                return None;
            }
        }
    } else {
        info!(horizon = %horizon, "no encoder file; categorical columns pass through");
        None
    };

    match HorizonArtifact::new(model, schema, encoder) {
        Ok(artifact) => {
            info!(horizon = %horizon, store_id, "loaded model artifact");
            Some(artifact)
        }
        Err(e) => {
            warn!(horizon = %horizon, error = %e, "artifact failed validation");
            None
        }
    }
}
