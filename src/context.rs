/// The values every link is built from.
///
/// `area` and `iteration` are hierarchical paths as the service shows them
/// (usually `Project\Team` style), `organization` is the base URL of the
/// organization without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub team: String,
    pub area: String,
    pub iteration: String,
    pub organization: String,
    pub project: String,
}

impl Context {
    pub fn new(
        team: impl Into<String>,
        area: impl Into<String>,
        iteration: impl Into<String>,
        organization: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        let organization: String = organization.into();
        Self {
            team: team.into(),
            area: area.into(),
            iteration: iteration.into(),
            organization: organization.trim_end_matches('/').to_string(),
            project: project.into(),
        }
    }

    /// Last segment of the area path
    pub fn area_short(&self) -> &str {
        short_path(&self.area)
    }

    /// Last segment of the iteration path
    pub fn iteration_short(&self) -> &str {
        short_path(&self.iteration)
    }

    /// `{organization}/{project}`, the prefix shared by every link
    pub fn project_url(&self) -> String {
        format!("{}/{}", self.organization, self.project)
    }
}

/// Final segment of a `\` or `/` separated path.
///
/// Behaves like a basename: a trailing separator gives an empty segment.
pub fn short_path(path: &str) -> &str {
    match path.rfind(['\\', '/']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
