// Student repository generation: CI workflow, README, homework, tests, exams.
// Text comes from llm_client::TextGenerator; static files live in `templates`.

pub mod generator;
pub mod latex;
pub mod prompts;
pub mod templates;

pub use generator::{generate_course_artifacts, ArtifactOptions};
