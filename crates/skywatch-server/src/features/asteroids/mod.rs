// Asteroid and close-approach endpoints

mod routes;

pub use routes::routes;
