//! Measurement files and training labels
//!
//! Reads the space-separated track files (imputing missing readings) and
//! produces the labels used to train the classifier.

mod labeling;
mod parser;

pub use labeling::{SubclassLabeler, BIRD_FAST_MEAN, PLANE_MEAN_BOUNDS};
pub use parser::{
    impute_missing, parse_input_file, parse_likelihood_file, parse_matrix, parse_training_file,
    read_matrix,
};
