// Solar flare endpoints

mod routes;

pub use routes::routes;
