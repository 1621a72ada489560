pub mod date;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod gallery;
pub mod logging;
pub mod models;
pub mod stats;
pub mod store;
pub mod updater;

pub use error::{Error, Result};
