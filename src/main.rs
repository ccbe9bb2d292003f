//! Radar classifier CLI
//!
//! Command-line interface for classifying radar tracks as birds or planes

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use radar_classifier::{
    data::{parse_input_file, parse_likelihood_file, parse_training_file, SubclassLabeler},
    models::LikelihoodParams,
    report::{print_detailed, print_predictions},
    AppConfig, ClassifierConfig, EmissionMode, LikelihoodModel, SequentialClassifier,
    TransitionModel,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "radar_classifier")]
#[command(about = "Sequential Bayesian classification of radar tracks (Bird vs Plane)")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the configured data and classify the input tracks
    Classify(RunArgs),

    /// Train and print the fitted per-class parameters
    Inspect(RunArgs),

    /// Write the default configuration to a file
    InitConfig {
        /// Output file path
        #[arg(default_value = "radar_classifier.toml")]
        path: String,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Training tracks file
    #[arg(short, long)]
    training: Option<String>,

    /// Tracks to classify
    #[arg(short, long)]
    input: Option<String>,

    /// Likelihood table file
    #[arg(short, long)]
    likelihood: Option<String>,

    /// Train per-record Gaussians (record_max) on the training tracks instead of
    /// using the likelihood table
    #[arg(long = "enable-additional-feature", visible_alias = "eaf")]
    enable_additional_feature: bool,

    /// Label training tracks with speed sub-classes (Gaussian modes only)
    #[arg(long)]
    refine_labels: bool,

    /// Likelihood mode: table, gaussian or record_max
    #[arg(short, long)]
    mode: Option<EmissionMode>,

    /// Transition model: self_only or mixing
    #[arg(long)]
    transition: Option<TransitionModel>,

    /// Show sub-class and probability for every object
    #[arg(short, long)]
    detailed: bool,

    /// Classify the bird and plane parts of the training file as two lists
    /// instead of the input file
    #[arg(long)]
    training_halves: bool,
}

fn main() {
    if let Err(err) = run() {
        let input_error = err
            .downcast_ref::<radar_classifier::Error>()
            .map_or(false, |e| e.is_input_error());
        if input_error {
            eprintln!("{} {:#}", "Input error:".red().bold(), err);
            std::process::exit(2);
        }
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => AppConfig::default(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("radar_classifier={}", config.logging.level).parse()?),
        )
        .init();

    match cli.command {
        Commands::Classify(args) => {
            let classifier = train_classifier(&args, &config)?;
            classify(&args, &config, &classifier)?;
        }
        Commands::Inspect(args) => {
            let classifier = train_classifier(&args, &config)?;
            if let Some(model) = classifier.likelihood_model() {
                print_model(model);
            }
        }
        Commands::InitConfig { path } => {
            AppConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write {}", path))?;
            println!("{}", format!("Default configuration written to {}", path).green());
        }
    }

    Ok(())
}

/// Config values overridden by the command-line flags
fn resolve_classifier_config(args: &RunArgs, config: &AppConfig) -> ClassifierConfig {
    let mut classifier_config = config.classifier.clone();
    if args.enable_additional_feature && classifier_config.mode == EmissionMode::Table {
        classifier_config.mode = EmissionMode::RecordMax;
    }
    if let Some(mode) = args.mode {
        classifier_config.mode = mode;
    }
    if let Some(transition) = args.transition {
        classifier_config.transition = transition;
    }
    classifier_config
}

/// Resolve the mode and train on the matching file
fn train_classifier(args: &RunArgs, config: &AppConfig) -> Result<SequentialClassifier> {
    let classifier_config = resolve_classifier_config(args, config);

    let (records, labels) = match classifier_config.mode {
        EmissionMode::Table => {
            let path = args.likelihood.as_deref().unwrap_or(config.data.likelihood.as_str());
            let rows = parse_likelihood_file(path)
                .with_context(|| format!("Failed to read likelihood table {}", path))?;
            (rows, config.data.table_labels.clone())
        }
        EmissionMode::Gaussian | EmissionMode::RecordMax => {
            let path = args.training.as_deref().unwrap_or(config.data.training.as_str());
            let rows = parse_training_file(path)
                .with_context(|| format!("Failed to read training tracks {}", path))?;
            let labeler = SubclassLabeler::new(config.data.split_ratio);
            let labels = if args.refine_labels {
                labeler.subclass_labels(&rows)
            } else {
                labeler.plain_labels(&rows)
            };
            (rows, labels)
        }
    };

    tracing::info!(
        "Training {} classifier ({} transition) on {} records",
        classifier_config.mode,
        classifier_config.transition,
        records.len()
    );

    let mut classifier = SequentialClassifier::new(classifier_config);
    classifier
        .train(&records, &labels)
        .context("Training failed")?;
    Ok(classifier)
}

fn classify(args: &RunArgs, config: &AppConfig, classifier: &SequentialClassifier) -> Result<()> {
    if args.training_halves {
        let path = args.training.as_deref().unwrap_or(config.data.training.as_str());
        let rows = parse_training_file(path)
            .with_context(|| format!("Failed to read training tracks {}", path))?;
        let (birds, planes) = SubclassLabeler::new(config.data.split_ratio).split(&rows);
        for (title, part) in [("Bird tracks", birds), ("Plane tracks", planes)] {
            println!("{}", format!("=== {} ({}) ===", title, part.len()).bold());
            report(args, classifier, part)?;
        }
        return Ok(());
    }

    let path = args.input.as_deref().unwrap_or(config.data.input.as_str());
    let inputs =
        parse_input_file(path).with_context(|| format!("Failed to read input tracks {}", path))?;
    report(args, classifier, &inputs)
}

fn report(args: &RunArgs, classifier: &SequentialClassifier, tracks: &[Vec<f64>]) -> Result<()> {
    let predictions = classifier
        .predict_detailed(tracks)
        .context("Classification failed")?;

    if args.detailed {
        println!("{}", format!("=== {} objects ===", predictions.len()).bold());
        print_detailed(&predictions);
    } else {
        let labels: Vec<&str> = predictions.iter().map(|p| p.label.as_str()).collect();
        print_predictions(&labels);
    }

    Ok(())
}

fn print_model(model: &LikelihoodModel) {
    println!("{}", format!("=== {} model ===", model.mode()).bold());
    let classes = model.classes();

    match model.params() {
        LikelihoodParams::Table {
            rows,
            initial_probability,
        } => {
            println!("  Initial probability: {:.3}", initial_probability);
            for (i, label) in classes.iter() {
                let row = &rows[i];
                let peak = row
                    .iter()
                    .enumerate()
                    .fold((0, 0.0), |best, (j, &p)| if p > best.1 { (j, p) } else { best });
                println!(
                    "  {:<8} {} entries, peak {:.4} at index {}",
                    label,
                    row.len(),
                    peak.1,
                    peak.0
                );
            }
        }
        LikelihoodParams::Gaussian(params) => {
            for (i, label) in classes.iter() {
                let p = &params[i];
                println!(
                    "  {:<8} mean {:>8.3}  variance {:>9.3}  std {:>7.3}  prior {:.3}",
                    label,
                    p.gaussian.mean,
                    p.gaussian.variance,
                    p.gaussian.std(),
                    p.prior
                );
            }
        }
        LikelihoodParams::RecordMax(params) => {
            for (i, label) in classes.iter() {
                let p = &params[i];
                println!(
                    "  {:<8} {} records  prior {:.3}",
                    label,
                    p.records.len(),
                    p.prior
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(flags: &[&str]) -> RunArgs {
        let mut argv = vec!["radar_classifier", "classify"];
        argv.extend_from_slice(flags);
        match Cli::parse_from(argv).command {
            Commands::Classify(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_additional_feature_selects_record_max() {
        let config = AppConfig::default();

        let resolved = resolve_classifier_config(&run_args(&[]), &config);
        assert_eq!(resolved.mode, EmissionMode::Table);

        let resolved = resolve_classifier_config(&run_args(&["--eaf"]), &config);
        assert_eq!(resolved.mode, EmissionMode::RecordMax);

        let resolved = resolve_classifier_config(
            &run_args(&["--enable-additional-feature", "--mode", "gaussian"]),
            &config,
        );
        assert_eq!(resolved.mode, EmissionMode::Gaussian);
    }

    #[test]
    fn test_transition_flag_overrides_config() {
        let resolved = resolve_classifier_config(
            &run_args(&["--transition", "mixing", "--training-halves"]),
            &AppConfig::default(),
        );
        assert_eq!(resolved.transition, TransitionModel::Mixing);
    }
}
