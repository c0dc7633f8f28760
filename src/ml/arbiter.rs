use crate::ml::classifier::TicketClassifier;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which model produced the selected prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// The probabilistic generative model (Naive Bayes)
    Primary,

    /// The tree-ensemble model (Random Forest)
    Ensemble,
}

/// Outcome of one dual-model arbitration.
///
/// A model failure is a first-class outcome, not an exception: `Failed`
/// carries no label index, so a sentinel can never reach a label encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arbitration {
    /// One model's prediction was selected by confidence comparison
    Decided {
        label: usize,
        confidence: f64,
        source: ModelSource,
    },

    /// Either model invocation failed; no usable prediction for this
    /// dimension. Confidence is treated as 0.0.
    Failed { reason: String },
}

impl Arbitration {
    pub fn is_failed(&self) -> bool {
        matches!(self, Arbitration::Failed { .. })
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Arbitration::Decided { confidence, .. } => *confidence,
            Arbitration::Failed { .. } => 0.0,
        }
    }
}

/// Run both models of one label dimension and select by confidence.
///
/// The primary model wins ties: its prediction is returned whenever its
/// max-posterior confidence is greater than or equal to the ensemble's.
/// Errors from either model are caught and logged, never propagated.
pub fn arbitrate(
    primary: &dyn TicketClassifier,
    ensemble: &dyn TicketClassifier,
    text: &str,
) -> Arbitration {
    let primary_result = primary.predict_confidence(text);
    let ensemble_result = ensemble.predict_confidence(text);

    match (primary_result, ensemble_result) {
        (Ok((p_label, p_conf)), Ok((e_label, e_conf))) => {
            if p_conf >= e_conf {
                Arbitration::Decided {
                    label: p_label,
                    confidence: p_conf,
                    source: ModelSource::Primary,
                }
            } else {
                Arbitration::Decided {
                    label: e_label,
                    confidence: e_conf,
                    source: ModelSource::Ensemble,
                }
            }
        }
        (Err(e), _) => {
            warn!(
                model = primary.name(),
                dimension = primary.dimension(),
                error = %e,
                "Primary model invocation failed"
            );
            Arbitration::Failed {
                reason: format!("{}: {}", primary.name(), e),
            }
        }
        (_, Err(e)) => {
            warn!(
                model = ensemble.name(),
                dimension = ensemble.dimension(),
                error = %e,
                "Ensemble model invocation failed"
            );
            Arbitration::Failed {
                reason: format!("{}: {}", ensemble.name(), e),
            }
        }
    }
}
