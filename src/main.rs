// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remedybot CLI - HTML accessibility audit and remediation
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use remedybot::audit::Severity;
use remedybot::config::load_config;
use remedybot::dom::decode_lossy;
use remedybot::labels::DisabledGenerator;
use remedybot::report::{generate_report, OutputFormat, PageReport};
use remedybot::{scanner, Pipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Audit HTML pages for accessibility defects and patch them in place
#[derive(Parser)]
#[command(name = "remedybot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single HTML file without changing it
    Audit {
        /// HTML file to audit
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Configuration file
        #[arg(long, default_value = "remedybot.toml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Remediate a single HTML file
    Fix {
        /// HTML file to remediate
        file: PathBuf,

        /// URL the page was fetched from; relative URLs resolve against it
        #[arg(long, default_value = "")]
        base_url: String,

        /// Where to write the remediated HTML (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Where to write the audit/remediation report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Configuration file
        #[arg(long, default_value = "remedybot.toml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Remediate every HTML file under a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Base URL the directory is served from
        #[arg(long, default_value = "")]
        base_url: String,

        /// Directory for remediated files (mirrors the input layout)
        #[arg(long)]
        out_dir: PathBuf,

        /// Configuration file
        #[arg(long, default_value = "remedybot.toml")]
        config: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("remedybot=debug")
    } else {
        EnvFilter::new("remedybot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_pipeline(config_path: &Path) -> anyhow::Result<Pipeline> {
    let config = load_config(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    // no text-generation backend is wired into the CLI; alt text uses fallbacks
    Ok(Pipeline::new(config, Arc::new(DisabledGenerator)))
}

fn read_html(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_lossy(&bytes))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { file, format, config, verbose } => {
            init_logging(verbose);
            let pipeline = build_pipeline(&config)?;
            let html = read_html(&file)?;
            let (_, issues) = pipeline.audit(&html)?;

            let source = file.display().to_string();
            let report = generate_report(&PageReport::new(&source, &issues, None), format.into());
            println!("{}", report);

            if issues.iter().any(|i| i.severity >= Severity::Medium) {
                std::process::exit(1);
            }
        }

        Commands::Fix { file, base_url, output, report, format, config, verbose } => {
            init_logging(verbose);
            let pipeline = build_pipeline(&config)?;
            let html = read_html(&file)?;
            let outcome = pipeline.run(&html, &base_url).await?;

            write_output(&outcome.html, output.as_deref())?;

            if let Some(report_path) = report {
                let source = file.display().to_string();
                let page = PageReport::new(&source, &outcome.issues, Some(&outcome.report));
                std::fs::write(&report_path, generate_report(&page, format.into()))?;
                eprintln!("Report written to {}", report_path.display());
            }
        }

        Commands::Batch { dir, base_url, out_dir, config, verbose } => {
            init_logging(verbose);
            let pipeline = build_pipeline(&config)?;
            let pages = scanner::scan_directory(&dir, &base_url);
            let results = pipeline.run_batch(pages).await;

            let mut failed = 0;
            for (name, result) in results {
                match result {
                    Ok(outcome) => {
                        let target = out_dir.join(&name);
                        if let Some(parent) = target.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(&target, &outcome.html)?;
                        let summary = outcome.summary();
                        println!(
                            "{}: {} issue(s), {} fix(es) applied",
                            name,
                            summary.total(),
                            outcome.report.applied()
                        );
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!("{}: failed: {}", name, e);
                    }
                }
            }
            info!(failed, "Batch finished");

            if failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Output written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
