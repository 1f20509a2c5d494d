/// Result of an engine operation, mirroring the embedded engine's fixed
/// status set. Any raw value outside the set becomes `Unknown` and must be
/// treated as a contract violation, never silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Yield,
    RuntimeError,
    SyntaxError,
    MemoryError,
    HandlerError,
    FileError,
    Unknown(i32),
}

impl StatusCode {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Ok,
            1 => Self::Yield,
            2 => Self::RuntimeError,
            3 => Self::SyntaxError,
            4 => Self::MemoryError,
            5 => Self::HandlerError,
            6 => Self::FileError,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Yield => 1,
            Self::RuntimeError => 2,
            Self::SyntaxError => 3,
            Self::MemoryError => 4,
            Self::HandlerError => 5,
            Self::FileError => 6,
            Self::Unknown(raw) => raw,
        }
    }
}

/// A failed engine operation: the status plus an owned copy of the engine's
/// error message. The engine takes the copy before rebalancing its stack,
/// so the fault stays valid across later operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFault {
    pub status: StatusCode,
    pub message: String,
}

impl EngineFault {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(StatusCode::RuntimeError, message)
    }
}
