//! Classification models module
//!
//! Per-class likelihoods (table lookup or Gaussian) and the sequential
//! classifier that runs the forward recursion over each track.

mod classes;
mod classifier;
mod forward;
mod gaussian;
mod likelihood;

pub use classes::ClassSet;
pub use classifier::{Prediction, SequentialClassifier};
pub use forward::{decide, final_weights, forward};
pub use gaussian::UnivariateGaussian;
pub use likelihood::{table_index, ClassGaussian, LikelihoodModel, LikelihoodParams, RecordMixture};
