//! Output formatting utilities

use colored::Colorize;
use learnstyle::artifacts::ArtifactVersion;
use learnstyle::predict::PredictionResult;
use learnstyle::style::LearningStyle;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub(crate) fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// Print a warning message
pub(crate) fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an info message
pub(crate) fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue(), msg);
}

/// Print an error message
pub(crate) fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Prediction rendered for `--json`.
#[derive(Debug, Serialize)]
pub(crate) struct PredictionReport<'a> {
    version: Option<&'a ArtifactVersion>,
    ranked: Vec<RankedStyle>,
    top_styles: &'a [LearningStyle],
    balanced: bool,
    explanations: Vec<Explanation>,
}

#[derive(Debug, Serialize)]
struct RankedStyle {
    style: LearningStyle,
    probability: f64,
    percent: f64,
}

#[derive(Debug, Serialize)]
struct Explanation {
    style: LearningStyle,
    summary: &'static str,
    explanation: &'static str,
}

impl<'a> PredictionReport<'a> {
    pub(crate) fn new(result: &'a PredictionResult, version: Option<&'a ArtifactVersion>) -> Self {
        Self {
            version,
            ranked: result
                .ranked()
                .iter()
                .map(|s| RankedStyle {
                    style: s.style,
                    probability: s.probability,
                    percent: round2(s.percent()),
                })
                .collect(),
            top_styles: result.top_styles(),
            balanced: result.is_tie(),
            explanations: result
                .top_styles()
                .iter()
                .map(|&style| Explanation {
                    style,
                    summary: style.summary(),
                    explanation: style.explanation(),
                })
                .collect(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Print a prediction as text or JSON.
pub(crate) fn prediction(
    result: &PredictionResult,
    version: Option<&ArtifactVersion>,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        let report = PredictionReport::new(result, version);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    section("Prediction");
    if let Some(v) = version {
        kv("Model version", v);
    }
    for entry in result.ranked() {
        println!("  {:<12} {:>6.2}%", entry.style.name(), entry.percent());
    }
    println!();

    match result.dominant() {
        Some(style) => {
            success(&format!("Dominant learning style: {}", style.name().bold()));
            println!("  {}", style.explanation());
        }
        None => {
            warning(&format!("Balanced learning styles: {}", result.top_styles_label()));
            for style in result.top_styles() {
                println!("  {} {}", format!("{}:", style.name()).bold(), style.explanation());
            }
        }
    }
    Ok(())
}
