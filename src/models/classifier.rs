//! Sequential Bayesian classifier for measurement tracks

use super::classes::ClassSet;
use super::forward::{decide, final_weights, forward};
use super::likelihood::LikelihoodModel;
use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::fmt;

/// Sequential classifier: likelihood model plus forward recursion
#[derive(Debug, Clone)]
pub struct SequentialClassifier {
    /// Classifier configuration
    config: ClassifierConfig,
    /// Trained likelihood model, `None` until `train` succeeds
    model: Option<LikelihoodModel>,
}

impl SequentialClassifier {
    /// Create new untrained classifier
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Train on labeled records.
    ///
    /// # Arguments
    /// * `priors` - One likelihood row per class in table mode, one measurement
    ///   sequence per training object otherwise
    /// * `expected_outcome` - Label of each record, same length as `priors`
    ///
    /// Any previous training is discarded.
    pub fn train<S: AsRef<str>>(
        &mut self,
        priors: &[Vec<f64>],
        expected_outcome: &[S],
    ) -> Result<&mut Self> {
        self.config.validate()?;
        self.model = None;

        let model = LikelihoodModel::fit(
            self.config.mode,
            priors,
            expected_outcome,
            self.config.initial_probability,
        )?;

        tracing::info!(
            "Trained {} classifier on {} records, classes: {:?}",
            self.config.mode,
            priors.len(),
            model.classes().labels()
        );

        self.model = Some(model);
        Ok(self)
    }

    /// Whether `train` has completed
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Trained likelihood model
    pub fn likelihood_model(&self) -> Option<&LikelihoodModel> {
        self.model.as_ref()
    }

    /// Class labels in order of first appearance (empty before training)
    pub fn classes(&self) -> &[String] {
        self.model
            .as_ref()
            .map(|m| m.classes().labels())
            .unwrap_or(&[])
    }

    fn trained_model(&self) -> Result<&LikelihoodModel> {
        self.model.as_ref().ok_or(Error::NotTrained)
    }

    /// Forward probabilities of one sequence (T x K)
    pub fn forward_probabilities(&self, sequence: &[f64]) -> Result<Array2<f64>> {
        let model = self.trained_model()?;
        forward(
            model,
            sequence,
            self.config.transition,
            self.config.transition_probability,
        )
    }

    /// Classify one sequence, keeping the forward trace
    pub fn predict_one(&self, sequence: &[f64]) -> Result<Prediction> {
        let model = self.trained_model()?;
        let trace = self.forward_probabilities(sequence)?;
        Prediction::from_trace(model.classes(), trace)
    }

    /// Classify every sequence, in input order
    pub fn predict_detailed(&self, measurements: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        let model = self.trained_model()?;

        measurements
            .iter()
            .enumerate()
            .map(|(i, sequence)| {
                let trace = forward(
                    model,
                    sequence,
                    self.config.transition,
                    self.config.transition_probability,
                )
                .map_err(|err| match err {
                    Error::EmptySequence { .. } => Error::EmptySequence { sequence: i },
                    other => other,
                })?;
                let prediction = Prediction::from_trace(model.classes(), trace)?;
                tracing::debug!("Sequence {}: {}", i, prediction);
                Ok(prediction)
            })
            .collect()
    }

    /// Label of every sequence, in input order
    pub fn predict(&self, measurements: &[Vec<f64>]) -> Result<Vec<String>> {
        Ok(self
            .predict_detailed(measurements)?
            .into_iter()
            .map(|p| p.label)
            .collect())
    }
}

/// Decision for one sequence
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Winning class label
    pub label: String,
    /// Index of the class in training order
    pub class_id: usize,
    /// Final-step probability of the winning class
    pub probability: f64,
    /// Final-step probabilities of all classes
    pub all_probabilities: Array1<f64>,
    /// Forward probabilities for every time step (T x K)
    pub trace: Array2<f64>,
}

impl Prediction {
    fn from_trace(classes: &ClassSet, trace: Array2<f64>) -> Result<Self> {
        let all_probabilities =
            final_weights(&trace).ok_or(Error::EmptySequence { sequence: 0 })?;
        let (class_id, probability) = decide(all_probabilities.view());

        Ok(Self {
            label: classes.label(class_id).to_string(),
            class_id,
            probability,
            all_probabilities,
            trace,
        })
    }

    /// Number of time steps in the sequence
    pub fn n_steps(&self) -> usize {
        self.trace.nrows()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}% after {} steps)",
            self.label,
            self.probability * 100.0,
            self.n_steps()
        )
    }
}
