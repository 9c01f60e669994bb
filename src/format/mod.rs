//! The "D8CW" DAC waveform file format: layout constants, header codec and
//! the rolling checksum the firmware recomputes while syncing a partition.

pub mod checksum;
pub mod config;
pub mod header;

pub use self::checksum::*;
pub use self::config::*;
pub use self::header::*;
