// Astronomy Picture of the Day ingestion
//
// Natural key: the calendar date. At most one record per date; a stored
// date is never re-fetched.

pub mod models;
pub mod pipeline;
pub mod store;

pub use models::{DailyPicture, NewDailyPicture};
pub use pipeline::ApodPipeline;
