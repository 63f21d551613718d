// Solar flare event ingestion
//
// Natural key: the external flare id. A flare missing any of its three
// timing fields is rejected whole; timing is not optional for this domain.

pub mod models;
pub mod pipeline;
pub mod store;

pub use models::{FlareClass, SolarFlare};
pub use pipeline::FlarePipeline;
