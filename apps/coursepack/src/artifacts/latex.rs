//! Optional `pdflatex` pass over generated `.tex` files.
//!
//! Compilation is best effort: a missing toolchain or a failing document is
//! logged and never aborts artifact generation.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Compiled,
    ToolMissing,
    Failed(String),
}

/// Compiles `tex_path` to PDF next to the source file.
pub async fn compile_latex(tex_path: &Path) -> CompileOutcome {
    compile_with(tex_path, "pdflatex").await
}

async fn compile_with(tex_path: &Path, program: &str) -> CompileOutcome {
    let name = tex_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_dir = tex_path.parent().unwrap_or_else(|| Path::new("."));

    info!("Compiling {name}...");
    let output = Command::new(program)
        .arg("-interaction=nonstopmode")
        .arg(format!("-output-directory={}", output_dir.display()))
        .arg(tex_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => {
            info!("PDF generated for {name}");
            CompileOutcome::Compiled
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            warn!("Failed to compile {name}. Check LaTeX source. {stderr}");
            CompileOutcome::Failed(stderr)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{program} not found. Skipping PDF generation.");
            CompileOutcome::ToolMissing
        }
        Err(e) => {
            warn!("Error compiling LaTeX: {e}");
            CompileOutcome::Failed(e.to_string())
        }
    }
}
