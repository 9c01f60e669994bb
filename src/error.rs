use thiserror::Error;

/// Errors raised while generating or verifying a DAC waveform file.
///
/// Nothing here is retried: generation is deterministic, so every variant
/// points at a bad parameter, a bad file or a serializer bug.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Checksum mismatch: header 0x{expected:08X}, data 0x{actual:08X}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "bounce")]
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, WaveError>;
