use crate::error::{AppError, Result};
use crate::ml::vectorizer::TfidfVectorizer;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A trained text classifier for one label dimension.
///
/// Exactly two capabilities: a hard label prediction, and a prediction with
/// the maximum posterior probability across the full label set. Implementors
/// are read-only after loading and safe to share across requests.
pub trait TicketClassifier: Send + Sync {
    /// Model name for logs
    fn name(&self) -> &str;

    /// Label dimension this model was trained for ("classification" or
    /// "category")
    fn dimension(&self) -> &str;

    /// Number of labels in the model's index space
    fn n_classes(&self) -> usize;

    /// Predict the label index for a normalized input string
    fn predict(&self, text: &str) -> Result<usize>;

    /// Predict the label index together with the maximum posterior
    /// probability over all labels, in [0, 1]
    fn predict_confidence(&self, text: &str) -> Result<(usize, f64)>;
}

/// Multinomial Naive Bayes classifier evaluated from serialized parameters.
///
/// The artifact carries the fitted vectorizer, per-class log-priors and the
/// per-class feature log-likelihood matrix. Posteriors are recovered with a
/// log-sum-exp over the joint log-likelihoods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// Label dimension tag
    pub dimension: String,

    /// Fitted TF-IDF vectorizer
    vectorizer: TfidfVectorizer,

    /// log P(class), length n_classes
    class_log_prior: Vec<f64>,

    /// log P(feature | class), n_classes x n_features
    feature_log_prob: Array2<f64>,
}

impl NaiveBayesModel {
    pub fn new(
        dimension: impl Into<String>,
        vectorizer: TfidfVectorizer,
        class_log_prior: Vec<f64>,
        feature_log_prob: Array2<f64>,
    ) -> Result<Self> {
        if class_log_prior.is_empty() {
            return Err(AppError::ModelInvocation(
                "Naive Bayes model has no classes".to_string(),
            ));
        }
        if feature_log_prob.nrows() != class_log_prior.len() {
            return Err(AppError::ModelInvocation(format!(
                "Naive Bayes parameter shapes disagree: {} priors vs {} likelihood rows",
                class_log_prior.len(),
                feature_log_prob.nrows()
            )));
        }
        if feature_log_prob.ncols() != vectorizer.n_features() {
            return Err(AppError::ModelInvocation(format!(
                "Naive Bayes likelihood has {} columns but vectorizer produces {} features",
                feature_log_prob.ncols(),
                vectorizer.n_features()
            )));
        }

        Ok(Self {
            dimension: dimension.into(),
            vectorizer,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Posterior distribution over all label indices for one input.
    fn predict_proba(&self, text: &str) -> Array1<f64> {
        let features = self.vectorizer.transform(text);

        // Joint log-likelihood per class
        let mut jll: Vec<f64> = self
            .class_log_prior
            .iter()
            .enumerate()
            .map(|(c, &prior)| prior + self.feature_log_prob.row(c).dot(&features))
            .collect();

        // Softmax via log-sum-exp
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_sum = jll.iter().map(|&v| (v - max).exp()).sum::<f64>().ln() + max;
        for v in jll.iter_mut() {
            *v = (*v - log_sum).exp();
        }

        Array1::from_vec(jll)
    }
}

impl TicketClassifier for NaiveBayesModel {
    fn name(&self) -> &str {
        "naive_bayes"
    }

    fn dimension(&self) -> &str {
        &self.dimension
    }

    fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    fn predict(&self, text: &str) -> Result<usize> {
        let (label, _) = self.predict_confidence(text)?;
        Ok(label)
    }

    fn predict_confidence(&self, text: &str) -> Result<(usize, f64)> {
        let proba = self.predict_proba(text);
        argmax_confidence(&proba)
    }
}

/// One node in a serialized decision tree, stored as a flat array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal split: go left when feature value <= threshold
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Leaf with the class fraction distribution observed during training
    Leaf { distribution: Vec<f64> },
}

/// A single decision tree of the forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree for one feature vector and return the leaf distribution.
    fn evaluate<'a>(&'a self, features: &Array1<f64>) -> Result<&'a [f64]> {
        let mut idx = 0;
        // Bounded by node count; a longer walk means the node graph is cyclic.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        AppError::ModelInvocation(format!(
                            "Tree split references feature {} outside vector of length {}",
                            feature,
                            features.len()
                        ))
                    })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { distribution }) => return Ok(distribution),
                None => {
                    return Err(AppError::ModelInvocation(format!(
                        "Tree walk reached missing node {}",
                        idx
                    )))
                }
            }
        }

        Err(AppError::ModelInvocation(
            "Tree walk did not terminate at a leaf".to_string(),
        ))
    }
}

/// Random forest classifier evaluated from serialized trees.
///
/// The posterior over labels is the mean of the leaf class distributions
/// across all trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    /// Label dimension tag
    pub dimension: String,

    /// Fitted TF-IDF vectorizer
    vectorizer: TfidfVectorizer,

    /// Number of labels in the index space
    n_classes: usize,

    /// Serialized trees
    trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    pub fn new(
        dimension: impl Into<String>,
        vectorizer: TfidfVectorizer,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self> {
        if n_classes == 0 {
            return Err(AppError::ModelInvocation(
                "Random forest model has no classes".to_string(),
            ));
        }
        if trees.is_empty() {
            return Err(AppError::ModelInvocation(
                "Random forest model has no trees".to_string(),
            ));
        }

        Ok(Self {
            dimension: dimension.into(),
            vectorizer,
            n_classes,
            trees,
        })
    }

    fn predict_proba(&self, text: &str) -> Result<Array1<f64>> {
        let features = self.vectorizer.transform(text);
        let mut proba = Array1::zeros(self.n_classes);

        for tree in &self.trees {
            let distribution = tree.evaluate(&features)?;
            if distribution.len() != self.n_classes {
                return Err(AppError::ModelInvocation(format!(
                    "Tree leaf has {} classes, expected {}",
                    distribution.len(),
                    self.n_classes
                )));
            }
            for (acc, &p) in proba.iter_mut().zip(distribution) {
                *acc += p;
            }
        }

        proba /= self.trees.len() as f64;
        Ok(proba)
    }
}

impl TicketClassifier for RandomForestModel {
    fn name(&self) -> &str {
        "random_forest"
    }

    fn dimension(&self) -> &str {
        &self.dimension
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, text: &str) -> Result<usize> {
        let (label, _) = self.predict_confidence(text)?;
        Ok(label)
    }

    fn predict_confidence(&self, text: &str) -> Result<(usize, f64)> {
        let proba = self.predict_proba(text)?;
        argmax_confidence(&proba)
    }
}

/// Pick the highest-probability label; confidence is that probability,
/// clamped to [0, 1].
fn argmax_confidence(proba: &Array1<f64>) -> Result<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &p) in proba.iter().enumerate() {
        if !p.is_finite() {
            return Err(AppError::ModelInvocation(format!(
                "Non-finite probability {} at label index {}",
                p, idx
            )));
        }
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((idx, p)),
        }
    }

    best.map(|(idx, p)| (idx, p.clamp(0.0, 1.0)))
        .ok_or_else(|| AppError::ModelInvocation("Empty probability vector".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashMap;

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary: HashMap<String, usize> = [
            ("password".to_string(), 0),
            ("reset".to_string(), 1),
            ("invoice".to_string(), 2),
        ]
        .into_iter()
        .collect();

        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0, 1.0], (1, 1))
    }

    fn nb_model() -> NaiveBayesModel {
        // Class 0 strongly associated with password/reset, class 1 with invoice.
        let feature_log_prob = array![[-0.5, -0.5, -5.0], [-5.0, -5.0, -0.5]];
        NaiveBayesModel::new(
            "classification",
            vectorizer(),
            vec![0.5f64.ln(), 0.5f64.ln()],
            feature_log_prob,
        )
        .unwrap()
    }

    #[test]
    fn test_nb_posterior_sums_to_one() {
        let model = nb_model();
        let proba = model.predict_proba("password reset");

        let total: f64 = proba.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_nb_predicts_expected_class() {
        let model = nb_model();

        assert_eq!(model.predict("password reset").unwrap(), 0);
        assert_eq!(model.predict("invoice").unwrap(), 1);

        let (label, confidence) = model.predict_confidence("password reset").unwrap();
        assert_eq!(label, 0);
        assert!(confidence > 0.5 && confidence <= 1.0);
    }

    #[test]
    fn test_nb_empty_text_falls_back_to_prior() {
        let model = nb_model();
        let proba = model.predict_proba("");

        assert!((proba[0] - 0.5).abs() < 1e-9);
        assert!((proba[1] - 0.5).abs() < 1e-9);

        // Degenerate input must still produce a usable prediction.
        let (_, confidence) = model.predict_confidence("").unwrap();
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn test_nb_rejects_mismatched_shapes() {
        let result = NaiveBayesModel::new(
            "classification",
            vectorizer(),
            vec![0.5f64.ln(), 0.5f64.ln()],
            array![[-0.5, -0.5, -5.0]],
        );

        assert!(result.is_err());
    }

    fn forest_model() -> RandomForestModel {
        // Two stumps splitting on the password feature.
        let tree = |low: Vec<f64>, high: Vec<f64>| DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.1,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { distribution: low },
                TreeNode::Leaf { distribution: high },
            ],
        };

        RandomForestModel::new(
            "classification",
            vectorizer(),
            2,
            vec![
                tree(vec![0.2, 0.8], vec![0.9, 0.1]),
                tree(vec![0.0, 1.0], vec![0.7, 0.3]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_forest_averages_leaf_distributions() {
        let model = forest_model();

        let (label, confidence) = model.predict_confidence("password").unwrap();
        assert_eq!(label, 0);
        assert!((confidence - 0.8).abs() < 1e-9);

        let (label, confidence) = model.predict_confidence("invoice").unwrap();
        assert_eq!(label, 1);
        assert!((confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_forest_rejects_wrong_leaf_width() {
        let bad_tree = DecisionTree {
            nodes: vec![TreeNode::Leaf {
                distribution: vec![1.0],
            }],
        };
        let model =
            RandomForestModel::new("classification", vectorizer(), 2, vec![bad_tree]).unwrap();

        assert!(model.predict_confidence("password").is_err());
    }

    #[test]
    fn test_forest_detects_cyclic_trees() {
        let cyclic = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 0,
                right: 0,
            }],
        };
        let model =
            RandomForestModel::new("classification", vectorizer(), 2, vec![cyclic]).unwrap();

        assert!(model.predict("password").is_err());
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_tie() {
        let proba = array![0.4, 0.4, 0.2];
        let (label, confidence) = argmax_confidence(&proba).unwrap();

        assert_eq!(label, 0);
        assert!((confidence - 0.4).abs() < 1e-12);
    }
}
