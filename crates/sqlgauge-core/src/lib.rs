pub mod config;
pub mod corpus;
pub mod engine;
pub mod equivalence;
pub mod errors;
pub mod executor;
pub mod metrics_api;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod sampler;

pub mod report;
