//! Output formatting

mod display;

pub use display::{format_predictions, print_detailed, print_predictions, DisplayCategory};
