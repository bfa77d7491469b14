use serde::Deserialize;

/// Contents of a config file. Every field may be overridden from the
/// command line or environment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub team: Option<String>,
    /// Area path, e.g. `Project\Team`
    #[serde(default)]
    pub area: Option<String>,
    /// Iteration path, e.g. `Project\Sprint 12`
    #[serde(default)]
    pub iteration: Option<String>,
    /// Organization base URL, e.g. `https://dev.azure.com/contoso`
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

/// Context values given on the command line or through the environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub team: Option<String>,
    pub area: Option<String>,
    pub iteration: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
}
