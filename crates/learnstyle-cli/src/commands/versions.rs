//! Versions command: list complete artifact versions.

use crate::error::{CliError, Result};
use crate::output;
use colored::Colorize;
use learnstyle::artifacts::{ArtifactStore, ArtifactVersion};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct VersionEntry {
    version: ArtifactVersion,
    created: Option<String>,
    accuracy: Option<f64>,
    latest: bool,
}

fn entries(store: &ArtifactStore) -> Result<Vec<VersionEntry>> {
    let registry = store.registry()?;
    if registry.is_empty() {
        return Err(CliError::ArtifactsMissing(store.dir().to_path_buf()));
    }
    let latest = registry.latest().cloned();

    Ok(registry
        .versions()
        .iter()
        .map(|v| {
            // A missing or unreadable summary only hides the accuracy column.
            let accuracy = match store.load_summary(v) {
                Ok(summary) => Some(summary.accuracy),
                Err(e) => {
                    tracing::warn!(version = %v, error = %e, "summary unavailable");
                    None
                }
            };
            VersionEntry {
                version: v.clone(),
                created: v
                    .timestamp()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
                accuracy,
                latest: latest.as_ref() == Some(v),
            }
        })
        .collect())
}

/// Run the versions command
pub(crate) fn run(artifacts: &Path, json: bool) -> Result<()> {
    let store = ArtifactStore::new(artifacts);
    let entries = entries(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    output::section(&format!("Model versions in {}", artifacts.display()));
    for e in &entries {
        let accuracy = e
            .accuracy
            .map_or_else(|| "-".to_string(), |a| format!("{:.2}%", a * 100.0));
        let created = e.created.as_deref().unwrap_or("-");
        let line = format!("  {}  {created}  accuracy {accuracy}", e.version);
        if e.latest {
            println!("{} {}", line.bold(), "(latest)".green());
        } else {
            println!("{line}");
        }
    }
    output::info(&format!("{} version(s)", entries.len()));
    Ok(())
}
