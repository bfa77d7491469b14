use serde::Deserialize;
use std::fmt;

/// Pipeline identifier as reported by `az`.
///
/// The CLI emits numbers, but string ids are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PipelineId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineId::Number(n) => write!(f, "{}", n),
            PipelineId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for PipelineId {
    fn from(n: u64) -> Self {
        PipelineId::Number(n)
    }
}

/// One configured build pipeline. Other fields in the `az` output are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineRecord {
    pub id: PipelineId,
    #[serde(default)]
    pub name: Option<String>,
}

impl PipelineRecord {
    pub fn new(id: impl Into<PipelineId>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}
