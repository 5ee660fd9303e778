//! CasaVida dashboard API: dataset, CRUD, seed and Creative Studio routes.

pub mod creative;
pub mod error;
pub mod routes;
pub mod server;

pub use server::{router, run, AppState};
