//! Tracing bootstrap with a reloadable filter: logging is live before the
//! settings file is read, then tightened to the configured filter.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
