#![allow(dead_code)]

use helpdesk_triage::config::ArtifactConfig;
use helpdesk_triage::ml::{
    DecisionTree, LabelEncoder, NaiveBayesModel, RandomForestModel, TfidfVectorizer, TreeNode,
};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Tiny two-class vocabulary: index 0 ~ access problems (login, password),
/// index 1 ~ billing problems (invoice, refund).
pub fn test_vectorizer() -> TfidfVectorizer {
    let vocabulary: HashMap<String, usize> = [
        ("login".to_string(), 0),
        ("password".to_string(), 1),
        ("invoice".to_string(), 2),
        ("refund".to_string(), 3),
    ]
    .into_iter()
    .collect();

    TfidfVectorizer::new(vocabulary, vec![1.0; 4], (1, 1))
}

pub fn test_nb(dimension: &str) -> NaiveBayesModel {
    let feature_log_prob = Array2::from_shape_vec(
        (2, 4),
        vec![-0.5, -0.5, -4.0, -4.0, -4.0, -4.0, -0.5, -0.5],
    )
    .unwrap();

    NaiveBayesModel::new(
        dimension,
        test_vectorizer(),
        vec![0.5f64.ln(), 0.5f64.ln()],
        feature_log_prob,
    )
    .unwrap()
}

pub fn test_rf(dimension: &str) -> RandomForestModel {
    let tree = DecisionTree {
        nodes: vec![
            TreeNode::Split {
                feature: 0,
                threshold: 0.1,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf {
                distribution: vec![0.3, 0.7],
            },
            TreeNode::Leaf {
                distribution: vec![0.8, 0.2],
            },
        ],
    };

    RandomForestModel::new(dimension, test_vectorizer(), 2, vec![tree]).unwrap()
}

pub fn test_encoder(dimension: &str, labels: &[&str]) -> LabelEncoder {
    LabelEncoder::new(dimension, labels.iter().map(|s| s.to_string()).collect()).unwrap()
}

/// Write a complete, consistent set of six artifacts into `dir`.
pub fn write_test_artifacts(dir: &Path) {
    let artifacts = ArtifactConfig {
        model_dir: dir.to_path_buf(),
    };

    write(
        &artifacts.nb_classification_path(),
        &test_nb("classification"),
    );
    write(
        &artifacts.rf_classification_path(),
        &test_rf("classification"),
    );
    write(&artifacts.nb_category_path(), &test_nb("category"));
    write(&artifacts.rf_category_path(), &test_rf("category"));
    write(
        &artifacts.classification_encoder_path(),
        &test_encoder("classification", &["Incident", "Request"]),
    );
    write(
        &artifacts.category_encoder_path(),
        &test_encoder("category", &["Account Access", "Payments"]),
    );
}

pub fn write<T: serde::Serialize>(path: &Path, artifact: &T) {
    std::fs::write(path, bincode::serialize(artifact).unwrap()).unwrap();
}
