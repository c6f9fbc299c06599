pub mod settings;
pub mod tables;

pub use settings::{AppConfig, PipelineSettings, RatingSettings, ServerSettings};
pub use tables::{PlayerTierScale, ReferenceTables};
