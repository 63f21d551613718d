// Near-Earth object feed ingestion
//
// The feed is a two-level payload: date -> asteroids -> close approaches.
// Asteroids dedupe on the external reference id (first write wins);
// approaches dedupe on the (asteroid, timestamp) pair.

pub mod models;
pub mod pipeline;
pub mod store;

pub use models::{Asteroid, CloseApproach, CloseApproachWithAsteroid};
pub use pipeline::{FeedSummary, NeoPipeline};
