pub mod convert;
pub mod derive;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;

pub use error::{Result, ToolError};
