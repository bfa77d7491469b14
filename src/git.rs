use anyhow::{anyhow, Context, Result};
use std::process::Command;

/// Source of the current repository's short name
pub trait RepoSource {
    fn repo_name(&self) -> Result<String>;
}

/// Reads the repository name from the `origin` remote of the git checkout
/// in the current directory.
#[derive(Debug, Clone)]
pub struct GitRemote {
    remote: String,
}

impl GitRemote {
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
        }
    }
}

impl Default for GitRemote {
    fn default() -> Self {
        Self::new("origin")
    }
}

impl RepoSource for GitRemote {
    fn repo_name(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["remote", "get-url", &self.remote])
            .output()
            .context("Failed to run git. Is it installed and on PATH?")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "git remote get-url {} failed: {}",
                self.remote,
                stderr.trim()
            ));
        }

        let url = String::from_utf8_lossy(&output.stdout);
        repo_name_from_remote(url.trim())
    }
}

/// Extract the repository name from a remote URL
///
/// Handles both HTTPS remotes (`https://org@dev.azure.com/org/project/_git/repo`)
/// and SSH remotes (`git@ssh.dev.azure.com:v3/org/project/repo`).
pub fn repo_name_from_remote(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        anyhow::bail!("Could not determine repository name from remote URL '{}'", url);
    }
    Ok(name.to_string())
}
