// Astronomy picture of the day endpoints

mod routes;

pub use routes::routes;
