//! DGA Detection CLI
//!
//! CLI tool for classifying URLs and inspecting domain features.

mod resources;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use dga_core::{Classifier, Detection, Detector, FeatureVector};

use resources::{load_detector, load_reference, ResourceArgs};

#[derive(Parser)]
#[command(name = "dga-cli")]
#[command(about = "Detect algorithmically generated (DGA) domains")]
struct Cli {
    #[command(flatten)]
    resources: ResourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the domain of a single URL
    Classify {
        /// URL to classify
        #[arg(short, long)]
        url: String,

        /// Print the full detection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for URLs on stdin, one per line
    Interactive,

    /// Print the feature vector of a domain
    Features {
        /// Domain, as extracted from a URL
        #[arg(short, long)]
        domain: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load all resources and report what was loaded
    Validate,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { url, json } => cmd_classify(&cli.resources, &url, json),
        Commands::Interactive => cmd_interactive(&cli.resources),
        Commands::Features { domain, json } => cmd_features(&cli.resources, &domain, json),
        Commands::Validate => cmd_validate(&cli.resources),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_detection(detection: &Detection) {
    println!("Domain:     {}", detection.domain);
    println!("Prediction: {}", detection.label.verdict());
}

fn print_features(features: &FeatureVector) {
    for (name, value) in features.named() {
        println!("  {:<24} {}", name, value);
    }
}

fn cmd_classify(resources: &ResourceArgs, url: &str, json: bool) -> Result<(), String> {
    let detector = load_detector(&resources.paths()?)?;
    let detection = detector.inspect(url).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&detection)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", out);
    } else {
        print_detection(&detection);
    }

    Ok(())
}

fn cmd_interactive(resources: &ResourceArgs) -> Result<(), String> {
    let detector = load_detector(&resources.paths()?)?;
    let stdin = io::stdin();
    run_loop(&detector, stdin.lock(), io::stdout().lock())
}

/// Read one URL per line until EOF, answering each in turn.
fn run_loop<C, R, W>(detector: &Detector<C>, input: R, mut out: W) -> Result<(), String>
where
    C: Classifier,
    R: BufRead,
    W: Write,
{
    let write_err = |e: io::Error| format!("Failed to write output: {}", e);

    write!(out, "URL: ").map_err(write_err)?;
    out.flush().map_err(write_err)?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        let url = line.trim();

        if !url.is_empty() {
            match detector.inspect(url) {
                Ok(detection) => {
                    writeln!(out, "Domain:     {}", detection.domain).map_err(write_err)?;
                    writeln!(out, "Prediction: {}", detection.label.verdict()).map_err(write_err)?;
                }
                Err(e) => writeln!(out, "Error: {}", e).map_err(write_err)?,
            }
        }

        write!(out, "URL: ").map_err(write_err)?;
        out.flush().map_err(write_err)?;
    }

    writeln!(out).map_err(write_err)?;
    Ok(())
}

fn cmd_features(resources: &ResourceArgs, domain: &str, json: bool) -> Result<(), String> {
    let reference = load_reference(&resources.paths()?)?;
    let features = dga_core::extract_features(domain, &reference)
        .map_err(|e| format!("Invalid domain {:?}: {}", domain, e))?;

    if json {
        let out = serde_json::to_string_pretty(&features)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", out);
    } else {
        println!("Features for '{}':", domain);
        print_features(&features);
    }

    Ok(())
}

fn cmd_validate(resources: &ResourceArgs) -> Result<(), String> {
    let paths = resources.paths()?;
    let detector = load_detector(&paths)?;
    let reference = detector.reference();
    let model = detector.classifier();

    println!("Resources are valid");
    println!("  Characters:  {} ({})", reference.char_probs.len(), paths.char_probabilities.display());
    println!("  Bigrams:     {} ({})", reference.bigrams.len(), paths.bigrams.display());
    println!("  Trigrams:    {} ({})", reference.trigrams.len(), paths.trigrams.display());
    println!("  Model:       '{}', {} trees ({})", model.model_id, model.trees.len(), paths.model.display());

    Ok(())
}
