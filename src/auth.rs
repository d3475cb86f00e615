//! OAuth credentials and the cached access token model.

pub mod config;
pub mod token;

pub use config::*;
pub use token::{record::*, secret::*};
