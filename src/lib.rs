pub mod browser;
pub mod config;
pub mod context;
pub mod git;
pub mod links;
pub mod output;
pub mod pipelines;
