//! # Radar Track Classifier
//!
//! Classifies radar speed tracks as birds or planes with a sequential Bayesian
//! update over each track's readings.
//!
//! ## Modules
//!
//! - `models` - Likelihood models (table / Gaussian) and the sequential classifier
//! - `data` - Track file parsing with missing-value imputation, training labels
//! - `report` - Display categories and console output
//! - `config` - TOML configuration
//!
//! ## Example
//!
//! ```rust
//! use radar_classifier::{ClassifierConfig, EmissionMode, SequentialClassifier};
//!
//! let rows = vec![
//!     vec![0.05, 0.25, 0.05, 0.20, 0.05, 0.05, 0.05, 0.10, 0.10, 0.10],
//!     vec![0.10, 0.02, 0.10, 0.03, 0.10, 0.20, 0.10, 0.15, 0.10, 0.10],
//! ];
//!
//! let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Table));
//! classifier.train(&rows, &["Bird", "Plane"])?;
//!
//! let labels = classifier.predict(&[vec![1.0, 2.0, 1.0, 2.0, 1.0]])?;
//! assert_eq!(labels, vec!["Bird"]);
//! # Ok::<(), radar_classifier::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod report;

pub use config::{AppConfig, ClassifierConfig, EmissionMode, TransitionModel};
pub use error::{Error, Result};
pub use models::{LikelihoodModel, Prediction, SequentialClassifier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
