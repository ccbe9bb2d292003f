//! Per-class measurement likelihoods
//!
//! Three ways of scoring P(measurement | class):
//! - table: a pre-computed probability row per class, indexed by speed
//! - gaussian: one Gaussian per class fitted to the pooled training readings
//! - record_max: one Gaussian per training record, best record wins

use super::classes::ClassSet;
use super::gaussian::UnivariateGaussian;
use crate::config::EmissionMode;
use crate::error::{Error, Result};

/// Row position of a measurement: `round(x) * 2 - 1`, ties rounded to even
pub fn table_index(measurement: f64) -> f64 {
    measurement.round_ties_even() * 2.0 - 1.0
}

/// Pooled Gaussian and prior of one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassGaussian {
    pub gaussian: UnivariateGaussian,
    /// Share of training sequences carrying this class
    pub prior: f64,
}

/// Per-record Gaussians and prior of one class
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMixture {
    pub records: Vec<UnivariateGaussian>,
    pub prior: f64,
}

/// Mode-specific parameters, one entry per class index
#[derive(Debug, Clone, PartialEq)]
pub enum LikelihoodParams {
    Table {
        rows: Vec<Vec<f64>>,
        initial_probability: f64,
    },
    Gaussian(Vec<ClassGaussian>),
    RecordMax(Vec<RecordMixture>),
}

/// Trained likelihood model together with the classes it knows
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodModel {
    classes: ClassSet,
    params: LikelihoodParams,
}

impl LikelihoodModel {
    /// Fit a model in the given mode.
    ///
    /// `records` are likelihood rows in table mode and measurement sequences
    /// otherwise; `labels` runs parallel to them.
    pub fn fit<S: AsRef<str>>(
        mode: EmissionMode,
        records: &[Vec<f64>],
        labels: &[S],
        initial_probability: f64,
    ) -> Result<Self> {
        if records.len() != labels.len() {
            return Err(Error::LabelCountMismatch {
                records: records.len(),
                labels: labels.len(),
            });
        }
        if records.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        match mode {
            EmissionMode::Table => Self::fit_table(records, labels, initial_probability),
            EmissionMode::Gaussian => Self::fit_gaussian(records, labels),
            EmissionMode::RecordMax => Self::fit_record_max(records, labels),
        }
    }

    fn fit_table<S: AsRef<str>>(
        rows: &[Vec<f64>],
        labels: &[S],
        initial_probability: f64,
    ) -> Result<Self> {
        let mut classes = ClassSet::new();
        let mut table = Vec::new();

        for (row, label) in rows.iter().zip(labels) {
            let label = label.as_ref();
            let idx = classes.intern(label);
            if idx < table.len() {
                return Err(Error::DuplicateTableRow {
                    class: label.to_string(),
                });
            }
            tracing::debug!("Table row for '{}' with {} entries", label, row.len());
            table.push(row.clone());
        }

        Ok(Self {
            classes,
            params: LikelihoodParams::Table {
                rows: table,
                initial_probability,
            },
        })
    }

    fn fit_gaussian<S: AsRef<str>>(sequences: &[Vec<f64>], labels: &[S]) -> Result<Self> {
        let (classes, grouped) = group_by_class(sequences, labels);
        let total = sequences.len() as f64;

        let mut params = Vec::with_capacity(classes.len());
        for (idx, label) in classes.iter() {
            let records = &grouped[idx];
            let pooled: Vec<f64> = records.iter().flat_map(|r| r.iter().copied()).collect();
            let gaussian = fit_or_degenerate(label, &pooled)?;
            let prior = records.len() as f64 / total;

            tracing::debug!(
                "Class '{}': mean={:.4} variance={:.4} prior={:.4} ({} readings)",
                label,
                gaussian.mean,
                gaussian.variance,
                prior,
                pooled.len()
            );
            params.push(ClassGaussian { gaussian, prior });
        }

        Ok(Self {
            classes,
            params: LikelihoodParams::Gaussian(params),
        })
    }

    fn fit_record_max<S: AsRef<str>>(sequences: &[Vec<f64>], labels: &[S]) -> Result<Self> {
        let (classes, grouped) = group_by_class(sequences, labels);
        let total = sequences.len() as f64;

        let mut params = Vec::with_capacity(classes.len());
        for (idx, label) in classes.iter() {
            let records = grouped[idx]
                .iter()
                .map(|record| fit_or_degenerate(label, record))
                .collect::<Result<Vec<_>>>()?;
            let prior = records.len() as f64 / total;

            tracing::debug!(
                "Class '{}': {} record Gaussians, prior={:.4}",
                label,
                records.len(),
                prior
            );
            params.push(RecordMixture { records, prior });
        }

        Ok(Self {
            classes,
            params: LikelihoodParams::RecordMax(params),
        })
    }

    /// Classes in order of first appearance
    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn params(&self) -> &LikelihoodParams {
        &self.params
    }

    pub fn mode(&self) -> EmissionMode {
        match self.params {
            LikelihoodParams::Table { .. } => EmissionMode::Table,
            LikelihoodParams::Gaussian(_) => EmissionMode::Gaussian,
            LikelihoodParams::RecordMax(_) => EmissionMode::RecordMax,
        }
    }

    /// Number proportional to P(measurement | class)
    pub fn likelihood(&self, class: usize, measurement: f64) -> Result<f64> {
        match &self.params {
            LikelihoodParams::Table { rows, .. } => {
                let row = &rows[class];
                let index = table_index(measurement);
                if index.is_finite() && index >= 0.0 && (index as usize) < row.len() {
                    Ok(row[index as usize])
                } else {
                    Err(Error::TableIndexOutOfRange {
                        class: self.classes.label(class).to_string(),
                        measurement,
                        index: index as i64,
                        len: row.len(),
                    })
                }
            }
            LikelihoodParams::Gaussian(params) => Ok(params[class].gaussian.pdf(measurement)),
            LikelihoodParams::RecordMax(params) => Ok(params[class]
                .records
                .iter()
                .map(|g| g.pdf(measurement))
                .fold(0.0, f64::max)),
        }
    }

    /// Weight of a class before any measurement is seen.
    ///
    /// The global initial probability in table mode, the class prior otherwise.
    pub fn initial_weight(&self, class: usize) -> f64 {
        match &self.params {
            LikelihoodParams::Table {
                initial_probability,
                ..
            } => *initial_probability,
            LikelihoodParams::Gaussian(params) => params[class].prior,
            LikelihoodParams::RecordMax(params) => params[class].prior,
        }
    }

    /// Pooled Gaussian of a class, if fitted in gaussian mode
    pub fn gaussian(&self, label: &str) -> Option<&ClassGaussian> {
        match &self.params {
            LikelihoodParams::Gaussian(params) => self.classes.get(label).map(|i| &params[i]),
            _ => None,
        }
    }
}

/// Group records by label; the class set keeps first-appearance order
fn group_by_class<'a, S: AsRef<str>>(
    records: &'a [Vec<f64>],
    labels: &[S],
) -> (ClassSet, Vec<Vec<&'a [f64]>>) {
    let mut classes = ClassSet::new();
    let mut grouped: Vec<Vec<&[f64]>> = Vec::new();

    for (record, label) in records.iter().zip(labels) {
        let idx = classes.intern(label.as_ref());
        if idx == grouped.len() {
            grouped.push(Vec::new());
        }
        grouped[idx].push(record.as_slice());
    }

    (classes, grouped)
}

fn fit_or_degenerate(label: &str, samples: &[f64]) -> Result<UnivariateGaussian> {
    UnivariateGaussian::from_samples(samples).ok_or_else(|| Error::DegenerateVariance {
        class: label.to_string(),
        samples: samples.len(),
        variance: UnivariateGaussian::sample_variance(samples),
    })
}
