pub mod command;
pub mod config;
pub mod emoji;
pub mod error;
pub mod io;
pub mod lookup;
pub mod paths;
pub mod registry;
pub mod store;
pub mod types;

pub use error::{HuntError, Result};
