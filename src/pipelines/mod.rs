pub mod az;
pub mod types;

pub use az::{parse_pipeline_list, AzCli, PipelineLister};
pub use types::{PipelineId, PipelineRecord};
