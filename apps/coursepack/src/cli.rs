//! Command-line interface: argument parsing and subcommand dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::artifacts::{generate_course_artifacts, ArtifactOptions};
use crate::calendar::export_calendar;
use crate::config::{CourseConfig, Settings};
use crate::llm_client::GeminiClient;
use crate::planning::{load_plan, plan_course, write_plan};
use crate::toc;

/// Plan file written next to the working directory by `plan`.
const PLAN_OUTPUT_FILE: &str = "plan.json";
const CALENDAR_OUTPUT_FILE: &str = "plan.ics";

#[derive(Parser)]
#[command(name = "coursepack")]
#[command(author, version, about = "AI-assisted course materials and PDF outline tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Extract the bookmark outline of a PDF into toc.json
    Toc {
        /// Input PDF file
        pdf_path: PathBuf,
    },

    /// Plan the course, export plan.json and plan.ics, and generate the student repository
    Plan {
        /// Course configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Output directory for the student repository
        #[arg(short, long, default_value = "course_repo")]
        output_dir: PathBuf,
    },

    /// Re-export the calendar from an existing plan
    Calendar {
        /// Course configuration file (lecture time and duration)
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Plan produced by `plan`
        #[arg(short, long, default_value = PLAN_OUTPUT_FILE)]
        plan: PathBuf,

        /// Output .ics file
        #[arg(short, long, default_value = CALENDAR_OUTPUT_FILE)]
        output: PathBuf,
    },
}

pub async fn run(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Commands::Toc { pdf_path } => toc::run(&pdf_path)
            .with_context(|| format!("Failed to extract TOC from '{}'", pdf_path.display())),
        Commands::Plan { config, output_dir } => run_plan(&config, &output_dir, settings).await,
        Commands::Calendar {
            config,
            plan,
            output,
        } => run_calendar(&config, &plan, &output),
    }
}

async fn run_plan(config_path: &Path, output_dir: &Path, settings: &Settings) -> Result<()> {
    let config = CourseConfig::load(config_path)?;
    let api_key = config.resolve_api_key(settings)?;
    let client = GeminiClient::new(api_key);
    info!("LLM client initialized (model: {})", client.model());

    // 1. Schedule
    let plan = plan_course(&client, &config.book.subsections, config.quarter.start).await;

    // 2. Exports
    write_plan(Path::new(PLAN_OUTPUT_FILE), &plan).context("Failed to write plan")?;
    info!("Plan written to {PLAN_OUTPUT_FILE} ({} weeks)", plan.weeks.len());
    export_calendar(&plan, &config.quarter, Path::new(CALENDAR_OUTPUT_FILE))
        .context("Failed to export calendar")?;

    // 3. Student repository
    let options = ArtifactOptions {
        compile_latex: config.compile_latex,
    };
    let report = generate_course_artifacts(&client, &plan, output_dir, options)
        .await
        .context("Failed to generate course artifacts")?;
    info!(
        "Wrote {} files to {}",
        report.files.len(),
        output_dir.display()
    );
    if options.compile_latex {
        info!(
            "LaTeX: {} compiled, {} failed, {} skipped",
            report.compiled.len(),
            report.compile_failures.len(),
            report.compile_skipped
        );
        for path in &report.compile_failures {
            warn!("Compilation failed: {}", path.display());
        }
    }

    Ok(())
}

fn run_calendar(config_path: &Path, plan_path: &Path, output: &Path) -> Result<()> {
    let config = CourseConfig::load(config_path)?;
    let plan = load_plan(plan_path)
        .with_context(|| format!("Failed to read plan '{}'", plan_path.display()))?;
    export_calendar(&plan, &config.quarter, output).context("Failed to export calendar")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_toc_takes_single_positional_path() {
        let cli = Cli::try_parse_from(["coursepack", "toc", "sicp.pdf"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Toc {
                pdf_path: PathBuf::from("sicp.pdf")
            }
        );

        assert!(Cli::try_parse_from(["coursepack", "toc"]).is_err());
        assert!(Cli::try_parse_from(["coursepack", "toc", "a.pdf", "--verbose"]).is_err());
    }

    #[test]
    fn test_plan_defaults() {
        let cli = Cli::try_parse_from(["coursepack", "plan"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Plan {
                config: PathBuf::from("config.json"),
                output_dir: PathBuf::from("course_repo"),
            }
        );
    }

    #[test]
    fn test_calendar_overrides() {
        let cli = Cli::try_parse_from([
            "coursepack",
            "calendar",
            "--plan",
            "old/plan.json",
            "-o",
            "spring.ics",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Calendar {
                config: PathBuf::from("config.json"),
                plan: PathBuf::from("old/plan.json"),
                output: PathBuf::from("spring.ics"),
            }
        );
    }

    #[test]
    fn test_run_calendar_from_existing_plan() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        let plan = dir.path().join("plan.json");
        let output = dir.path().join("plan.ics");
        std::fs::write(
            &config,
            r#"{"quarter": {"start": "2025-01-06", "lecture_start_time": "10:00"}}"#,
        )
        .unwrap();
        std::fs::write(
            &plan,
            r#"{"weeks": [{"section": "1.1", "week": 1,
                "dates": {"monday": "2025-01-06"},
                "lectures": [{"title": "Intro", "topics": []}]}]}"#,
        )
        .unwrap();

        run_calendar(&config, &plan, &output).unwrap();

        let ics = std::fs::read_to_string(&output).unwrap();
        assert!(ics.contains("SUMMARY:Lecture: Intro"));
        assert!(ics.contains("DTSTART:20250106T100000"));
    }

    #[test]
    fn test_run_calendar_missing_plan_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"quarter": {"start": "2025-01-06"}}"#).unwrap();

        let err = run_calendar(&config, &dir.path().join("plan.json"), &dir.path().join("x.ics"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read plan"));
    }
}
