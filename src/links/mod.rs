pub mod resolver;
pub mod urls;

pub use resolver::{open, Resolution, Resolver, Target};
