//! Dual-model ticket classification.
//!
//! Raw ticket text is normalized, vectorized with the fitted TF-IDF
//! vocabulary shipped inside each model artifact, and scored by two
//! independently trained classifiers per label dimension. The arbiter picks
//! the more confident model's prediction, and the predictor decodes the
//! winning indices into human-readable labels.

pub mod arbiter;
pub mod classifier;
pub mod encoder;
pub mod loader;
pub mod predictor;
pub mod text;
pub mod vectorizer;

pub use arbiter::{arbitrate, Arbitration, ModelSource};
pub use classifier::{DecisionTree, NaiveBayesModel, RandomForestModel, TicketClassifier, TreeNode};
pub use encoder::LabelEncoder;
pub use loader::{DimensionModels, ModelBundle, ModelLoader};
pub use predictor::TicketPredictor;
pub use text::TextNormalizer;
pub use vectorizer::TfidfVectorizer;
