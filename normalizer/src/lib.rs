pub mod config;
pub mod container;
pub mod error;
pub mod locate;
pub mod normalize;
pub mod pipeline;
pub mod resample;
pub mod source;

pub use error::{IconError, Result};
