//! Forward recursion and final decision for a single sequence

use super::likelihood::LikelihoodModel;
use crate::config::TransitionModel;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1};

/// Forward probabilities of one sequence (T x K, one row per time step)
///
/// # Arguments
/// * `model` - Trained likelihood model
/// * `sequence` - Measurements in time order, non-empty
/// * `transition` - How mass carries over between steps
/// * `transition_probability` - Probability of staying in the same class
///
/// Every row is normalized to sum to one.
pub fn forward(
    model: &LikelihoodModel,
    sequence: &[f64],
    transition: TransitionModel,
    transition_probability: f64,
) -> Result<Array2<f64>> {
    let t = sequence.len();
    if t == 0 {
        return Err(Error::EmptySequence { sequence: 0 });
    }

    let n = model.classes().len();
    let mut alpha = Array2::zeros((t, n));

    // Initialization (t = 0)
    for j in 0..n {
        alpha[[0, j]] = model.likelihood(j, sequence[0])? * model.initial_weight(j);
    }
    normalize_row(&mut alpha, 0)?;

    // Recursion
    for t_idx in 1..t {
        let x = sequence[t_idx];
        for j in 0..n {
            let carried = carried_mass(
                alpha.row(t_idx - 1),
                j,
                transition,
                transition_probability,
            );
            alpha[[t_idx, j]] = model.likelihood(j, x)? * carried;
        }
        normalize_row(&mut alpha, t_idx)?;
    }

    Ok(alpha)
}

/// Mass flowing into class `j` from the previous step
fn carried_mass(
    previous: ArrayView1<f64>,
    j: usize,
    transition: TransitionModel,
    p: f64,
) -> f64 {
    match transition {
        // p + (1 - p) collapses to the class's own mass
        TransitionModel::SelfOnly => previous[j] * p + previous[j] * (1.0 - p),
        TransitionModel::Mixing => {
            let n = previous.len();
            if n == 1 {
                return previous[j];
            }
            let switch = (1.0 - p) / (n - 1) as f64;
            previous
                .iter()
                .enumerate()
                .map(|(i, &b)| if i == j { b * p } else { b * switch })
                .sum()
        }
    }
}

/// Divide row `t` by its sum
fn normalize_row(alpha: &mut Array2<f64>, t: usize) -> Result<()> {
    let sum: f64 = alpha.row(t).sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err(Error::DegenerateNormalization { step: t });
    }
    alpha.row_mut(t).mapv_inplace(|b| b / sum);
    Ok(())
}

/// Class index with the highest weight.
///
/// Starts from class 0 with a running maximum of 0 and only moves on a strictly
/// greater weight, so ties keep the class discovered first.
pub fn decide(weights: ArrayView1<f64>) -> (usize, f64) {
    weights
        .iter()
        .enumerate()
        .fold((0, 0.0), |(best, best_prob), (j, &p)| {
            if p > best_prob {
                (j, p)
            } else {
                (best, best_prob)
            }
        })
}

/// Final-step weights of a forward trace, `None` for a trace with no steps
pub fn final_weights(alpha: &Array2<f64>) -> Option<Array1<f64>> {
    let last = alpha.nrows().checked_sub(1)?;
    Some(alpha.row(last).to_owned())
}
