//! CasaVida dashboard core: the synthetic customer dataset, segment
//! profiles, and the SQLite store behind the dashboard's CRUD surface.

pub mod config;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod rng;
pub mod seed;
pub mod segment;
pub mod store;
pub mod types;

pub use dataset::{generate_full_customer_dataset, DatasetGenerator, SyntheticCustomerRecord};
pub use error::{CasaError, CasaResult};
pub use segment::Scenario;
