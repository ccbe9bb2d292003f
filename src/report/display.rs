//! Display categories and console output

use crate::models::Prediction;
use colored::Colorize;
use std::fmt;

/// Category shown to the user, whatever sub-class the model predicted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayCategory {
    Bird,
    Plane,
}

impl DisplayCategory {
    /// `Bird*` labels are birds, everything else is a plane
    pub fn from_label(label: &str) -> Self {
        if label.starts_with("Bird") {
            DisplayCategory::Bird
        } else {
            DisplayCategory::Plane
        }
    }
}

impl fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayCategory::Bird => write!(f, "Bird"),
            DisplayCategory::Plane => write!(f, "Plane"),
        }
    }
}

/// `Object {i}: {category}` lines, numbered from 1
pub fn format_predictions<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            format!(
                "Object {}: {}",
                i + 1,
                DisplayCategory::from_label(label.as_ref())
            )
        })
        .collect()
}

/// Print one line per object
pub fn print_predictions<S: AsRef<str>>(labels: &[S]) {
    for line in format_predictions(labels) {
        println!("{}", line);
    }
}

/// Print one line per object with the final probability, colored by category
pub fn print_detailed(predictions: &[Prediction]) {
    for (i, prediction) in predictions.iter().enumerate() {
        let category = DisplayCategory::from_label(&prediction.label);
        let category_str = match category {
            DisplayCategory::Bird => category.to_string().green(),
            DisplayCategory::Plane => category.to_string().cyan(),
        };
        println!(
            "  Object {:>3}: {:<5} | {:<7} {:>6.2}% | {} steps",
            i + 1,
            category_str,
            prediction.label,
            prediction.probability * 100.0,
            prediction.n_steps()
        );
    }
}
