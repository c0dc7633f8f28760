use crate::ml::arbiter::{arbitrate, Arbitration};
use crate::ml::classifier::TicketClassifier;
use crate::ml::encoder::LabelEncoder;
use crate::ml::loader::{DimensionModels, ModelBundle};
use crate::ml::text::TextNormalizer;
use crate::models::{TicketClassification, TicketText};
use tracing::{debug, warn};

/// End-to-end ticket classification pipeline.
///
/// Owns the four trained models and two encoders, constructed once from the
/// loader's bundle and shared read-only across requests. Inference mutates
/// nothing, so no locking is needed.
pub struct TicketPredictor {
    normalizer: TextNormalizer,
    classification: DimensionModels,
    category: DimensionModels,
}

impl TicketPredictor {
    pub fn new(bundle: ModelBundle) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            classification: bundle.classification,
            category: bundle.category,
        }
    }

    /// Classify a ticket's free text into both label dimensions.
    ///
    /// Returns `None` when either dimension fails — a half-populated result
    /// is never produced. Failures are logged here; callers only see the
    /// absence of a result.
    pub fn classify(&self, text: &TicketText) -> Option<TicketClassification> {
        let normalized = self.normalizer.normalize(&text.combined());
        debug!(normalized = %normalized, "Classifying ticket text");

        let classification = self.decide_dimension(&self.classification, &normalized)?;
        let category = self.decide_dimension(&self.category, &normalized)?;

        Some(TicketClassification {
            classification,
            category,
        })
    }

    /// Arbitrate one dimension and decode the winning label.
    fn decide_dimension(&self, models: &DimensionModels, normalized: &str) -> Option<String> {
        let outcome = arbitrate(&models.primary, &models.ensemble, normalized);

        match outcome {
            Arbitration::Decided {
                label,
                confidence,
                source,
            } => {
                debug!(
                    dimension = models.encoder.dimension.as_str(),
                    label_index = label,
                    confidence = confidence,
                    source = ?source,
                    "Dimension decided"
                );
                decode_label(&models.encoder, label)
            }
            Arbitration::Failed { reason } => {
                warn!(
                    dimension = models.encoder.dimension.as_str(),
                    reason = %reason,
                    "No usable prediction for dimension"
                );
                None
            }
        }
    }
}

fn decode_label(encoder: &LabelEncoder, index: usize) -> Option<String> {
    match encoder.decode(index) {
        Ok(label) => Some(label.to_string()),
        Err(e) => {
            warn!(
                dimension = encoder.dimension.as_str(),
                label_index = index,
                error = %e,
                "Failed to decode label index"
            );
            None
        }
    }
}
