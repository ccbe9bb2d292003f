//! Training labels for the bird/plane tracks
//!
//! Training files hold birds first and planes after. Sub-class labels split
//! each group further by mean speed, which gives the Gaussian modes tighter
//! per-class distributions.

use statrs::statistics::Statistics;

/// Mean speed above which a bird is labeled `Bird2`
pub const BIRD_FAST_MEAN: f64 = 80.0;

/// Upper mean-speed bounds of `Plane1`, `Plane2` and `Plane3`; faster is `Plane4`
pub const PLANE_MEAN_BOUNDS: [f64; 3] = [70.0, 85.0, 110.0];

/// Labels training rows by their position in the file
#[derive(Debug, Clone, Copy)]
pub struct SubclassLabeler {
    /// Share of rows that are birds
    pub split_ratio: f64,
}

impl Default for SubclassLabeler {
    fn default() -> Self {
        Self { split_ratio: 0.5 }
    }
}

impl SubclassLabeler {
    pub fn new(split_ratio: f64) -> Self {
        Self { split_ratio }
    }

    /// Index of the first plane row
    pub fn split_index(&self, n_rows: usize) -> usize {
        ((n_rows as f64 * self.split_ratio) as usize).min(n_rows)
    }

    /// Bird rows and plane rows of a training file
    pub fn split<'a>(&self, rows: &'a [Vec<f64>]) -> (&'a [Vec<f64>], &'a [Vec<f64>]) {
        rows.split_at(self.split_index(rows.len()))
    }

    /// `Bird` for rows before the split, `Plane` after
    pub fn plain_labels(&self, rows: &[Vec<f64>]) -> Vec<String> {
        let split = self.split_index(rows.len());
        (0..rows.len())
            .map(|i| if i < split { "Bird" } else { "Plane" }.to_string())
            .collect()
    }

    /// `Bird1`/`Bird2` and `Plane1`..`Plane4` by mean speed
    pub fn subclass_labels(&self, rows: &[Vec<f64>]) -> Vec<String> {
        let split = self.split_index(rows.len());
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let mean_speed = row.iter().mean();
                if i < split {
                    bird_subclass(mean_speed)
                } else {
                    plane_subclass(mean_speed)
                }
                .to_string()
            })
            .collect()
    }
}

fn bird_subclass(mean_speed: f64) -> &'static str {
    if mean_speed > BIRD_FAST_MEAN {
        "Bird2"
    } else {
        "Bird1"
    }
}

fn plane_subclass(mean_speed: f64) -> &'static str {
    if mean_speed < PLANE_MEAN_BOUNDS[0] {
        "Plane1"
    } else if mean_speed < PLANE_MEAN_BOUNDS[1] {
        "Plane2"
    } else if mean_speed < PLANE_MEAN_BOUNDS[2] {
        "Plane3"
    } else {
        "Plane4"
    }
}
