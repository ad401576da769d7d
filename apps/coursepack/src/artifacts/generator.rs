//! Course artifact generator: writes the student repository for a plan.
//!
//! Layout under the output directory:
//!   .github/workflows/verify.yml
//!   README.md
//!   homework/week_NN/{assignment.tex, test_week_N.scm, solution_week_N.scm}
//!   exams/{midterm_1, midterm_2, final_exam}.tex
//!
//! Model failures never abort generation: the file gets a placeholder comment
//! (see `generate_or_placeholder`) and the run continues.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::latex::{compile_latex, CompileOutcome};
use crate::artifacts::prompts::{
    EXAM_PROMPT_TEMPLATE, HOMEWORK_PROMPT_TEMPLATE, TEST_PROMPT_TEMPLATE,
};
use crate::artifacts::templates::{
    solution_stub, EXAM_EXAMPLE, HOMEWORK_EXAMPLE, STUDENT_README, VERIFY_WORKFLOW,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{
    fill_template, inline_list, MIMIC_FORMATTING_INSTRUCTION, PROFESSOR_PERSONA,
};
use crate::llm_client::{generate_or_placeholder, TextGenerator};
use crate::planning::models::{CoursePlan, PlannedWeek};

/// Rough number of key concepts per week, used to slice topics per exam.
const TOPICS_PER_WEEK: usize = 3;
/// Topics listed in an exam prompt before truncation.
const MAX_EXAM_PROMPT_TOPICS: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactOptions {
    /// Run `pdflatex` on every generated `.tex` file.
    pub compile_latex: bool,
}

/// Files written by a generation run, in write order, and what `pdflatex` made of them.
#[derive(Debug, Default)]
pub struct ArtifactReport {
    pub files: Vec<PathBuf>,
    pub compiled: Vec<PathBuf>,
    pub compile_failures: Vec<PathBuf>,
    /// `.tex` files left uncompiled because `pdflatex` is not installed.
    pub compile_skipped: usize,
}

impl ArtifactReport {
    pub fn record_compile(&mut self, tex_path: &Path, outcome: CompileOutcome) {
        match outcome {
            CompileOutcome::Compiled => self.compiled.push(tex_path.to_path_buf()),
            CompileOutcome::Failed(_) => self.compile_failures.push(tex_path.to_path_buf()),
            CompileOutcome::ToolMissing => self.compile_skipped += 1,
        }
    }
}

/// An exam and the topics it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamPaper<'a> {
    pub title: &'static str,
    pub topics: &'a [String],
}

impl ExamPaper<'_> {
    /// `Midterm 1` -> `midterm_1.tex`
    pub fn file_name(&self) -> String {
        format!("{}.tex", self.title.to_lowercase().replace(' ', "_"))
    }
}

/// Splits the course topics across two midterms and a final.
///
/// Midterm 1 covers the first third of the weeks, Midterm 2 the second third,
/// the final everything. Slices are clamped to the available topics.
pub fn exam_papers(all_topics: &[String], total_weeks: usize) -> Vec<ExamPaper<'_>> {
    let first_checkpoint = total_weeks / 3;
    let second_checkpoint = total_weeks * 2 / 3;
    let clamp = |index: usize| index.min(all_topics.len());

    let m1_end = clamp(first_checkpoint * TOPICS_PER_WEEK);
    let m2_end = clamp(second_checkpoint * TOPICS_PER_WEEK);

    vec![
        ExamPaper {
            title: "Midterm 1",
            topics: &all_topics[..m1_end],
        },
        ExamPaper {
            title: "Midterm 2",
            topics: &all_topics[m1_end..m2_end],
        },
        ExamPaper {
            title: "Final Exam",
            topics: all_topics,
        },
    ]
}

/// Writes the complete student repository for `plan` under `output_dir`.
pub async fn generate_course_artifacts(
    generator: &dyn TextGenerator,
    plan: &CoursePlan,
    output_dir: &Path,
    options: ArtifactOptions,
) -> Result<ArtifactReport, AppError> {
    info!(
        "--- Generating Course Repository in '{}' ---",
        output_dir.display()
    );
    let mut report = ArtifactReport::default();

    // 1. CI workflow
    let workflow_dir = output_dir.join(".github").join("workflows");
    write_file(&mut report, &workflow_dir.join("verify.yml"), VERIFY_WORKFLOW)?;
    info!("Created GitHub Workflow (Guile Scheme)");

    // 2. Student README
    write_file(&mut report, &output_dir.join("README.md"), STUDENT_README)?;
    info!("Created Student README.md");

    // 3. Weekly homework
    for week in &plan.weeks {
        generate_week(generator, week, output_dir, options, &mut report).await?;
    }

    // 4. Exams
    if plan.weeks.is_empty() {
        info!("No planned weeks; skipping exams");
        return Ok(report);
    }

    let all_topics = plan.all_key_concepts();
    let exams_dir = output_dir.join("exams");
    std::fs::create_dir_all(&exams_dir)?;

    for exam in exam_papers(&all_topics, plan.weeks.len()) {
        info!("... Generating {}", exam.title);
        let prompt = build_exam_prompt(&exam);
        let latex = generate_or_placeholder(generator, &prompt).await;

        let tex_path = exams_dir.join(exam.file_name());
        write_file(&mut report, &tex_path, &latex)?;
        if options.compile_latex {
            let outcome = compile_latex(&tex_path).await;
            report.record_compile(&tex_path, outcome);
        }
    }

    Ok(report)
}

async fn generate_week(
    generator: &dyn TextGenerator,
    week: &PlannedWeek,
    output_dir: &Path,
    options: ArtifactOptions,
    report: &mut ArtifactReport,
) -> Result<(), AppError> {
    let week_num = week.week;
    let week_dir = output_dir
        .join("homework")
        .join(format!("week_{week_num:02}"));

    // A. Assignment
    let latex = generate_or_placeholder(generator, &build_homework_prompt(week)).await;
    let tex_path = week_dir.join("assignment.tex");
    write_file(report, &tex_path, &latex)?;
    if options.compile_latex {
        let outcome = compile_latex(&tex_path).await;
        report.record_compile(&tex_path, outcome);
    }

    // B. Autograder test and the stub it loads
    let test_code = generate_or_placeholder(generator, &build_test_prompt(week)).await;
    write_file(
        report,
        &week_dir.join(format!("solution_week_{week_num}.scm")),
        &solution_stub(week_num),
    )?;
    write_file(
        report,
        &week_dir.join(format!("test_week_{week_num}.scm")),
        &test_code,
    )?;

    info!("Generated Scheme Artifacts for Week {week_num}");
    Ok(())
}

fn build_homework_prompt(week: &PlannedWeek) -> String {
    let homework = week.plan.homework.clone().unwrap_or_default();
    let topics = inline_list(&week.plan.key_concepts);
    let exercises = inline_list(&homework.exercises);
    let week_num = week.week.to_string();
    fill_template(
        HOMEWORK_PROMPT_TEMPLATE,
        &[
            ("persona", PROFESSOR_PERSONA),
            ("topics", topics.as_str()),
            ("exercises", exercises.as_str()),
            ("description", homework.description.as_str()),
            ("week", week_num.as_str()),
            ("mimic", MIMIC_FORMATTING_INSTRUCTION),
            ("example", HOMEWORK_EXAMPLE),
        ],
    )
}

fn build_test_prompt(week: &PlannedWeek) -> String {
    let topics = inline_list(&week.plan.key_concepts);
    let week_num = week.week.to_string();
    fill_template(
        TEST_PROMPT_TEMPLATE,
        &[("topics", topics.as_str()), ("week", week_num.as_str())],
    )
}

fn build_exam_prompt(exam: &ExamPaper<'_>) -> String {
    let shown = &exam.topics[..exam.topics.len().min(MAX_EXAM_PROMPT_TOPICS)];
    let topics = inline_list(shown);
    fill_template(
        EXAM_PROMPT_TEMPLATE,
        &[
            ("persona", PROFESSOR_PERSONA),
            ("title", exam.title),
            ("topics", topics.as_str()),
            ("mimic", MIMIC_FORMATTING_INSTRUCTION),
            ("example", EXAM_EXAMPLE),
        ],
    )
}

/// Writes `contents` to `path`, creating parent directories and replacing any existing file.
fn write_file(report: &mut ArtifactReport, path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    report.files.push(path.to_path_buf());
    Ok(())
}
