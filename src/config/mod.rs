mod schema;

pub use schema::{Config, Overrides};

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::Context;

/// File name searched for in the current directory and its parents
pub const LOCAL_CONFIG_NAME: &str = ".ado-open.yaml";

/// Get the config directory path (~/.config/ado-open/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("ado-open"))
}

/// Get the default config file path (~/.config/ado-open/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Walk up from `start` looking for a `.ado-open.yaml`
pub fn find_local_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(LOCAL_CONFIG_NAME))
        .find(|candidate| candidate.is_file())
}

/// A config together with the file it was read from
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Explicit config file. When `None`, the nearest `.ado-open.yaml`
///   above `cwd` is used, then `~/.config/ado-open/config.yaml`.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing default config file is not an error; every value can come from
/// flags or environment variables instead.
pub fn load_config(path: Option<PathBuf>, cwd: &Path) -> Result<LoadedConfig> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            explicit
        }
        None => match find_local_config(cwd).or_else(get_config_path) {
            Some(found) if found.is_file() => found,
            _ => return Ok(LoadedConfig::default()),
        },
    };

    let config = read_config_file(&config_path)?;
    Ok(LoadedConfig {
        config,
        source: Some(config_path),
    })
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))
}

/// Merge overrides over the config file and build the [`Context`].
///
/// Empty strings count as missing. All missing fields are reported together.
pub fn resolve_context(config: &Config, overrides: &Overrides) -> Result<Context> {
    fn pick(over: &Option<String>, file: &Option<String>) -> Option<String> {
        let present = |v: &&String| !v.trim().is_empty();
        over.as_ref()
            .filter(present)
            .or(file.as_ref().filter(present))
            .cloned()
    }

    let team = pick(&overrides.team, &config.team);
    let area = pick(&overrides.area, &config.area);
    let iteration = pick(&overrides.iteration, &config.iteration);
    let organization = pick(&overrides.organization, &config.organization);
    let project = pick(&overrides.project, &config.project);

    let mut missing = Vec::new();
    for (name, value) in [
        ("team", &team),
        ("area", &area),
        ("iteration", &iteration),
        ("organization", &organization),
        ("project", &project),
    ] {
        if value.is_none() {
            missing.push(format!(
                "{} (--{}, ADO_OPEN_{}, or `{}:` in the config file)",
                name,
                name,
                name.to_uppercase(),
                name
            ));
        }
    }

    match (team, area, iteration, organization, project) {
        (Some(team), Some(area), Some(iteration), Some(organization), Some(project)) => {
            Ok(Context::new(team, area, iteration, organization, project))
        }
        _ => anyhow::bail!("Missing context values:\n  - {}", missing.join("\n  - ")),
    }
}
