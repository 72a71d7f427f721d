//! Application-local prelude: conveniently import types/functions/macros
//! which are generally useful and should be available everywhere.

/// Application state accessors
pub use crate::application::{app_config, app_reader};

/// Commonly used Abscissa traits
pub use abscissa_core::{Application, Command, Runnable};

/// Tracing macros
pub use tracing::{debug, error, info, trace, warn};
