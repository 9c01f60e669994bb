//! Small helpers shared by the library and the `dacwave` binary

pub mod logging;

pub use logging::{init_logger, init_logger_with_level};
