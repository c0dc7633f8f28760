use crate::config::ArtifactConfig;
use crate::error::{AppError, Result};
use crate::ml::classifier::{NaiveBayesModel, RandomForestModel, TicketClassifier};
use crate::ml::encoder::LabelEncoder;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trained artifacts for one label dimension: the model pair and the encoder
/// they were trained against.
#[derive(Debug)]
pub struct DimensionModels {
    pub primary: NaiveBayesModel,
    pub ensemble: RandomForestModel,
    pub encoder: LabelEncoder,
}

/// All six artifacts the predictor needs, loaded and cross-checked.
#[derive(Debug)]
pub struct ModelBundle {
    pub classification: DimensionModels,
    pub category: DimensionModels,
}

/// Loads the serialized classifiers and encoders at startup.
///
/// Fails fast: every artifact must be present and internally consistent
/// before any inference is allowed. There is no degraded mode.
pub struct ModelLoader {
    artifacts: ArtifactConfig,
}

impl ModelLoader {
    pub fn new(artifacts: ArtifactConfig) -> Self {
        Self { artifacts }
    }

    /// Load all six artifacts, reporting every missing file at once.
    pub fn load(&self) -> Result<ModelBundle> {
        let required: [(PathBuf, &str); 6] = [
            (
                self.artifacts.nb_classification_path(),
                "NB classification model",
            ),
            (
                self.artifacts.rf_classification_path(),
                "RF classification model",
            ),
            (self.artifacts.nb_category_path(), "NB category model"),
            (self.artifacts.rf_category_path(), "RF category model"),
            (
                self.artifacts.classification_encoder_path(),
                "classification encoder",
            ),
            (self.artifacts.category_encoder_path(), "category encoder"),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(path, _)| !path.exists())
            .map(|(path, desc)| format!("{} at {}", desc, path.display()))
            .collect();

        if !missing.is_empty() {
            return Err(AppError::MissingArtifact(missing.join("; ")));
        }

        let classification = DimensionModels {
            primary: read_artifact(&self.artifacts.nb_classification_path())?,
            ensemble: read_artifact(&self.artifacts.rf_classification_path())?,
            encoder: read_encoder(&self.artifacts.classification_encoder_path())?,
        };
        let category = DimensionModels {
            primary: read_artifact(&self.artifacts.nb_category_path())?,
            ensemble: read_artifact(&self.artifacts.rf_category_path())?,
            encoder: read_encoder(&self.artifacts.category_encoder_path())?,
        };

        validate_dimension("classification", &classification)?;
        validate_dimension("category", &category)?;

        info!(
            model_dir = %self.artifacts.model_dir.display(),
            classification_labels = classification.encoder.len(),
            category_labels = category.encoder.len(),
            "Models and encoders loaded successfully"
        );

        Ok(ModelBundle {
            classification,
            category,
        })
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::MissingArtifact(format!("{}: {}", path.display(), e)))?;

    bincode::deserialize(&bytes)
        .map_err(|e| AppError::MissingArtifact(format!("{}: {}", path.display(), e)))
}

fn read_encoder(path: &Path) -> Result<LabelEncoder> {
    let mut encoder: LabelEncoder = read_artifact(path)?;
    encoder.rebuild_index();

    if encoder.is_empty() {
        return Err(AppError::MissingArtifact(format!(
            "{}: encoder has no labels",
            path.display()
        )));
    }

    Ok(encoder)
}

/// A classifier pair must share its encoder's dimension and index space.
/// Mixing encoders across dimensions produces meaningless labels, so it is
/// rejected here rather than discovered at inference time.
fn validate_dimension(expected: &str, models: &DimensionModels) -> Result<()> {
    for (role, dimension, n_classes) in [
        (
            "primary",
            models.primary.dimension(),
            models.primary.n_classes(),
        ),
        (
            "ensemble",
            models.ensemble.dimension(),
            models.ensemble.n_classes(),
        ),
    ] {
        if dimension != expected {
            return Err(AppError::MissingArtifact(format!(
                "{} model tagged for dimension '{}', expected '{}'",
                role, dimension, expected
            )));
        }
        if n_classes != models.encoder.len() {
            return Err(AppError::MissingArtifact(format!(
                "{} {} model has {} classes but the encoder has {} labels",
                expected,
                role,
                n_classes,
                models.encoder.len()
            )));
        }
    }

    if models.encoder.dimension != expected {
        return Err(AppError::MissingArtifact(format!(
            "encoder tagged for dimension '{}', expected '{}'",
            models.encoder.dimension, expected
        )));
    }

    Ok(())
}
