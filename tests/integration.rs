//! Integration tests for the radar classifier
//!
//! End-to-end checks of training, the forward recursion and the decision rule.

use approx::assert_relative_eq;
use radar_classifier::data::{parse_input_file, parse_likelihood_file, SubclassLabeler};
use radar_classifier::models::UnivariateGaussian;
use radar_classifier::report::format_predictions;
use radar_classifier::{
    ClassifierConfig, EmissionMode, Error, SequentialClassifier, TransitionModel,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn bird_plane_rows() -> Vec<Vec<f64>> {
    vec![
        vec![0.05, 0.25, 0.05, 0.20, 0.05, 0.05, 0.05, 0.10, 0.10, 0.10],
        vec![0.10, 0.02, 0.10, 0.03, 0.10, 0.20, 0.10, 0.15, 0.10, 0.10],
    ]
}

fn gaussian_training() -> (Vec<Vec<f64>>, Vec<&'static str>) {
    let tracks = vec![
        vec![30.0, 32.0, 29.0, 31.0],
        vec![28.0, 33.0, 30.0],
        vec![90.0, 95.0, 100.0, 92.0],
        vec![105.0, 98.0, 101.0],
        vec![97.0, 99.0],
    ];
    let labels = vec!["Bird", "Bird", "Plane", "Plane", "Plane"];
    (tracks, labels)
}

#[test]
fn test_simplex_invariant_every_step() {
    let (tracks, labels) = gaussian_training();
    let sequences = vec![
        vec![31.0, 60.0, 95.0, 40.0, 70.0],
        vec![100.0],
        vec![65.0, 65.0, 65.0],
    ];

    for mode in [EmissionMode::Gaussian, EmissionMode::RecordMax] {
        for transition in [TransitionModel::SelfOnly, TransitionModel::Mixing] {
            let mut classifier = SequentialClassifier::new(
                ClassifierConfig::new(mode).with_transition(transition),
            );
            classifier.train(&tracks, &labels).unwrap();

            for sequence in &sequences {
                let trace = classifier.forward_probabilities(sequence).unwrap();
                assert_eq!(trace.nrows(), sequence.len());
                for row in trace.rows() {
                    assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-9);
                    assert!(row.iter().all(|&b| b >= 0.0 && b <= 1.0));
                }
            }
        }
    }
}

#[test]
fn test_gaussian_weights_are_independent_running_products() {
    let (tracks, labels) = gaussian_training();
    let sequence = vec![45.0, 50.0, 55.0, 60.0];

    let bird = UnivariateGaussian::from_samples(&[30.0, 32.0, 29.0, 31.0, 28.0, 33.0, 30.0])
        .unwrap();
    let plane = UnivariateGaussian::from_samples(&[
        90.0, 95.0, 100.0, 92.0, 105.0, 98.0, 101.0, 97.0, 99.0,
    ])
    .unwrap();

    // log(prior * prod likelihood) per class
    let bird_log: f64 =
        (2.0f64 / 5.0).ln() + sequence.iter().map(|&x| bird.pdf(x).ln()).sum::<f64>();
    let plane_log: f64 =
        (3.0f64 / 5.0).ln() + sequence.iter().map(|&x| plane.pdf(x).ln()).sum::<f64>();
    let expected_log_ratio = bird_log - plane_log;

    let mut finals = Vec::new();
    for p in [0.05, 0.5, 0.95] {
        let mut classifier = SequentialClassifier::new(
            ClassifierConfig::new(EmissionMode::Gaussian).with_transition_probability(p),
        );
        classifier.train(&tracks, &labels).unwrap();

        let prediction = classifier.predict_one(&sequence).unwrap();
        let w = &prediction.all_probabilities;
        assert_relative_eq!((w[0] / w[1]).ln(), expected_log_ratio, epsilon = 1e-6);
        finals.push(w.clone());
    }

    for w in &finals[1..] {
        assert_relative_eq!(w[0], finals[0][0], epsilon = 1e-12);
        assert_relative_eq!(w[1], finals[0][1], epsilon = 1e-12);
    }
}

#[test]
fn test_tie_goes_to_first_discovered_class() {
    let row = vec![0.1, 0.2, 0.1, 0.2, 0.1, 0.2, 0.1, 0.2, 0.1, 0.2];
    let mut classifier = SequentialClassifier::new(ClassifierConfig::default());
    classifier
        .train(&[row.clone(), row], &["Plane", "Bird"])
        .unwrap();

    let prediction = classifier.predict_one(&[1.0, 3.0, 5.0]).unwrap();
    assert_relative_eq!(prediction.all_probabilities[0], 0.5);
    assert_relative_eq!(prediction.all_probabilities[1], 0.5);
    assert_eq!(prediction.label, "Plane");

    let mut classifier = SequentialClassifier::new(ClassifierConfig::default());
    classifier
        .train(&vec![bird_plane_rows()[0].clone(); 2], &["Bird", "Plane"])
        .unwrap();
    assert_eq!(classifier.predict(&[vec![4.0, 2.0]]).unwrap(), vec!["Bird"]);
}

#[test]
fn test_table_round_trip_single_class() {
    let row: Vec<f64> = (1..=10).map(|i| i as f64 / 10.0).collect();
    let mut classifier = SequentialClassifier::new(ClassifierConfig::default());
    classifier.train(&[row], &["Bird"]).unwrap();

    let model = classifier.likelihood_model().unwrap();
    // round(4) * 2 - 1 = 7
    assert_relative_eq!(model.likelihood(0, 4.0).unwrap(), 0.8);
    assert_relative_eq!(model.likelihood(0, 1.0).unwrap(), 0.2);

    let prediction = classifier.predict_one(&[4.0]).unwrap();
    assert_eq!(prediction.label, "Bird");
    assert_relative_eq!(prediction.probability, 1.0);
}

#[test]
fn test_gaussian_parameter_estimation() {
    let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Gaussian));
    classifier
        .train(&[vec![68.0, 70.0], vec![72.0], vec![120.0, 130.0]], &["Bird1", "Bird1", "Plane"])
        .unwrap();

    let bird = classifier
        .likelihood_model()
        .and_then(|m| m.gaussian("Bird1"))
        .unwrap();
    assert_relative_eq!(bird.gaussian.mean, 70.0, epsilon = 1e-12);
    assert_relative_eq!(bird.gaussian.variance, 4.0, epsilon = 1e-12);
    assert_relative_eq!(bird.prior, 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_bird_plane_end_to_end() {
    let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Table));
    classifier
        .train(&bird_plane_rows(), &["Bird", "Plane"])
        .unwrap();

    let labels = classifier
        .predict(&[vec![1.0, 2.0, 1.0, 2.0, 1.0]])
        .unwrap();
    assert_eq!(labels, vec!["Bird"]);
}

#[test]
fn test_single_measurement_sequence_is_decided() {
    let (tracks, labels) = gaussian_training();
    let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Gaussian));
    classifier.train(&tracks, &labels).unwrap();

    let predictions = classifier.predict_detailed(&[vec![31.0], vec![99.0]]).unwrap();
    assert_eq!(predictions[0].label, "Bird");
    assert_eq!(predictions[1].label, "Plane");
    assert!(predictions.iter().all(|p| p.n_steps() == 1));
}

#[test]
fn test_order_of_predictions_follows_input() {
    let (tracks, labels) = gaussian_training();
    let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Gaussian));
    classifier.train(&tracks, &labels).unwrap();

    let labels = classifier
        .predict(&[
            vec![100.0, 96.0],
            vec![30.0, 31.0],
            vec![29.0],
            vec![102.0, 99.0, 94.0],
        ])
        .unwrap();
    assert_eq!(labels, vec!["Plane", "Bird", "Bird", "Plane"]);
}

#[test]
fn test_precondition_errors() {
    let mut classifier = SequentialClassifier::new(ClassifierConfig::default());
    assert!(matches!(
        classifier.predict(&[vec![1.0]]),
        Err(Error::NotTrained)
    ));

    let err = classifier
        .train(&bird_plane_rows(), &["Bird"])
        .unwrap_err();
    assert!(matches!(err, Error::LabelCountMismatch { records: 2, labels: 1 }));

    classifier
        .train(&bird_plane_rows(), &["Bird", "Plane"])
        .unwrap();
    assert!(matches!(
        classifier.predict(&[vec![42.0]]),
        Err(Error::TableIndexOutOfRange { .. })
    ));

    let mut gaussian = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Gaussian));
    assert!(matches!(
        gaussian.train(&[vec![1.0, 2.0], vec![5.0]], &["Bird", "Plane"]),
        Err(Error::DegenerateVariance { .. })
    ));
}

#[test]
fn test_files_to_display_lines() {
    let mut likelihood = NamedTempFile::new().unwrap();
    for row in bird_plane_rows() {
        let line: Vec<String> = row.iter().map(|p| p.to_string()).collect();
        writeln!(likelihood, "{}", line.join(" ")).unwrap();
    }

    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "1 2 NaN 1 2").unwrap();
    writeln!(input, "3 3 4 NaN").unwrap();

    let rows = parse_likelihood_file(likelihood.path()).unwrap();
    let tracks = parse_input_file(input.path()).unwrap();
    // 1, 2, 1.5, 1, 2 after imputation
    assert_relative_eq!(tracks[0][2], 1.5);

    let mut classifier = SequentialClassifier::new(ClassifierConfig::default());
    classifier.train(&rows, &["Bird", "Plane"]).unwrap();
    let labels = classifier.predict(&tracks).unwrap();

    assert_eq!(
        format_predictions(&labels),
        vec!["Object 1: Bird", "Object 2: Plane"]
    );
}

#[test]
fn test_subclass_training_maps_back_to_categories() {
    let tracks = vec![
        vec![60.0, 64.0, 62.0],
        vec![88.0, 92.0, 90.0],
        vec![62.0, 66.0, 64.0],
        vec![120.0, 125.0, 118.0],
    ];
    let labels = SubclassLabeler::new(0.5).subclass_labels(&tracks);
    assert_eq!(labels, vec!["Bird1", "Bird2", "Plane1", "Plane4"]);

    let mut classifier = SequentialClassifier::new(ClassifierConfig::new(EmissionMode::Gaussian));
    classifier.train(&tracks, &labels).unwrap();
    assert_eq!(classifier.classes().len(), 4);

    let predicted = classifier.predict(&[vec![122.0, 119.0], vec![89.0, 91.0]]).unwrap();
    assert_eq!(predicted, vec!["Plane4", "Bird2"]);
    assert_eq!(
        format_predictions(&predicted),
        vec!["Object 1: Plane", "Object 2: Bird"]
    );
}
