//! Command-line interface for farbs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::components::register_examples;
use crate::config::{ScanConfig, UnresolvedClassPolicy, DEFAULT_NAMESPACE};
use crate::context::Farbs;
use crate::dom::Document;
use crate::error::{FarbsError, Result};
use crate::registry::ScanReport;

/// farbs - Instantiate components for marked elements of an XHTML document.
#[derive(Parser)]
#[command(name = "farbs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a document with the example components registered.
    Scan {
        /// XHTML/XML file to scan
        file: PathBuf,

        /// Id of the element to start scanning below (default: document element)
        #[arg(short, long)]
        root: Option<String>,

        /// Attribute namespace (default: farbs)
        #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,

        /// Skip nodes with an unregistered class instead of stopping the scan
        #[arg(long)]
        skip_unresolved: bool,

        /// Print the scan report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            file,
            root,
            namespace,
            skip_unresolved,
            json,
        } => scan_command(&file, root.as_deref(), &namespace, skip_unresolved, json),
    }
}

/// Execute the scan command.
fn scan_command(
    file: &Path,
    root: Option<&str>,
    namespace: &str,
    skip_unresolved: bool,
    json: bool,
) -> Result<()> {
    let policy = if skip_unresolved {
        UnresolvedClassPolicy::Skip
    } else {
        UnresolvedClassPolicy::Abort
    };
    let config = ScanConfig::new(namespace)?.with_policy(policy);

    let text = std::fs::read_to_string(file)?;
    let document = Document::parse(&text)?;
    let root = match root {
        Some(id) => document
            .find_by_id(id)
            .ok_or_else(|| FarbsError::NodeNotFound(id.to_string()))?,
        None => document.root_element(),
    };

    let farbs = Farbs::with_config(config);
    register_examples(&farbs);
    let report = farbs.parse(&root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(file, &report);
    }

    Ok(())
}

fn print_report(file: &Path, report: &ScanReport) {
    println!(
        "{} {}",
        style("Scanned").bold(),
        style(file.display()).cyan()
    );
    println!();

    for node in &report.instantiated {
        println!(
            "  {} {}",
            style(&node.id).green(),
            style(format!("({})", node.class)).dim()
        );
        for (name, value) in &node.properties {
            println!("    {name} = {value}");
        }
    }

    println!();
    println!("  Instances: {}", report.instantiated.len());
    if !report.generated_ids.is_empty() {
        println!("  Generated ids: {}", report.generated_ids.join(", "));
    }
    if !report.unresolved.is_empty() {
        let label = if report.aborted {
            "Unresolved (scan stopped):"
        } else {
            "Unresolved (skipped):"
        };
        println!(
            "  {} {}",
            style(label).yellow().bold(),
            report.unresolved.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["farbs", "scan", "page.xhtml"]);

        let Commands::Scan {
            file,
            root,
            namespace,
            skip_unresolved,
            json,
        } = cli.command;
        assert_eq!(file, PathBuf::from("page.xhtml"));
        assert!(root.is_none());
        assert_eq!(namespace, "farbs");
        assert!(!skip_unresolved);
        assert!(!json);
    }

    #[test]
    fn test_cli_parse_scan_with_options() {
        let cli = Cli::parse_from([
            "farbs",
            "scan",
            "page.xhtml",
            "--root",
            "main",
            "--namespace",
            "widgets",
            "--skip-unresolved",
            "--json",
        ]);

        let Commands::Scan {
            root,
            namespace,
            skip_unresolved,
            json,
            ..
        } = cli.command;
        assert_eq!(root, Some("main".to_string()));
        assert_eq!(namespace, "widgets");
        assert!(skip_unresolved);
        assert!(json);
    }

    #[test]
    fn test_scan_command_rejects_bad_namespace() {
        let err = scan_command(Path::new("unused.xhtml"), None, "bad_ns", false, false)
            .unwrap_err();
        assert!(matches!(err, FarbsError::InvalidNamespace(_)));
    }
}
