use anyhow::{anyhow, Context, Result};
use std::process::Command;

use super::types::PipelineRecord;

/// Lists the build pipelines configured for a repository
pub trait PipelineLister {
    fn list_pipelines(&self, repo_name: &str) -> Result<Vec<PipelineRecord>>;
}

/// Pipeline lister backed by the Azure CLI (`az pipelines list`).
///
/// Organization and project come from the `az devops` defaults, the same way
/// they do when the command is run by hand.
#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
    verbose: bool,
}

impl AzCli {
    pub fn new(verbose: bool) -> Self {
        Self {
            program: default_program().to_string(),
            verbose,
        }
    }

    /// Arguments passed to `az` for a repository
    pub fn list_args(repo_name: &str) -> Vec<String> {
        vec![
            "pipelines".to_string(),
            "list".to_string(),
            "--repository".to_string(),
            repo_name.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ]
    }
}

impl PipelineLister for AzCli {
    fn list_pipelines(&self, repo_name: &str) -> Result<Vec<PipelineRecord>> {
        let args = Self::list_args(repo_name);
        if self.verbose {
            eprintln!("Running: {} {}", self.program, args.join(" "));
        }

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .with_context(|| {
                format!(
                    "Failed to run {}. Is the Azure CLI installed and on PATH?",
                    self.program
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} {} failed: {}",
                self.program,
                args.join(" "),
                stderr.trim()
            ));
        }

        let records = parse_pipeline_list(&output.stdout)?;
        if self.verbose {
            eprintln!("  Found {} pipelines for {}", records.len(), repo_name);
        }
        Ok(records)
    }
}

/// The Azure CLI ships as a batch wrapper on Windows, which `Command` only
/// finds by its full name.
fn default_program() -> &'static str {
    if cfg!(windows) {
        "az.cmd"
    } else {
        "az"
    }
}

/// Parse the JSON array printed by `az pipelines list`
pub fn parse_pipeline_list(stdout: &[u8]) -> Result<Vec<PipelineRecord>> {
    if stdout.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(stdout).context("Failed to parse pipeline list: invalid JSON from az")
}
