use thiserror::Error;

use crate::status::EngineFault;
use crate::value::TypeTag;

/// Marshalling failures. Every recoverable kind leaves the operand stack at
/// the depth it had before the failing operation began; `EngineAllocation`
/// is fatal and makes no such promise.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BridgeError {
    #[error("global \"{name}\" is {} but {} was requested", found.name(), expected.name())]
    TypeMismatch {
        name: String,
        expected: TypeTag,
        found: TypeTag,
    },
    #[error("global \"{name}\" is {} and cannot be called", found.name())]
    FunctionNotFound { name: String, found: TypeTag },
    #[error("call argument {position} has unsupported type {}", found.name())]
    InvalidParameterType { position: usize, found: TypeTag },
    #[error("{} is not a valid return type for a call", requested.name())]
    InvalidReturnType { requested: TypeTag },
    #[error("call to \"{name}\" returned {} but {} was expected", found.name(), expected.name())]
    ReturnTypeMismatch {
        name: String,
        expected: TypeTag,
        found: TypeTag,
    },
    #[error("call to \"{name}\" failed inside the engine: {}", fault.message)]
    ProtectedCall { name: String, fault: EngineFault },
    #[error("engine ran out of memory: {message}")]
    EngineAllocation { message: String },
}

impl BridgeError {
    /// Fatal errors invalidate the environment; the caller must tear it
    /// down rather than retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EngineAllocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusCode;

    #[test]
    fn display_names_the_offending_global() {
        let error = BridgeError::TypeMismatch {
            name: "health".to_string(),
            expected: TypeTag::Number,
            found: TypeTag::Boolean,
        };
        assert_eq!(
            error.to_string(),
            "global \"health\" is boolean but number was requested"
        );
    }

    #[test]
    fn protected_call_display_carries_engine_message() {
        let error = BridgeError::ProtectedCall {
            name: "explode".to_string(),
            fault: EngineFault::new(StatusCode::RuntimeError, "stack smashed"),
        };
        assert!(error.to_string().contains("stack smashed"));
        assert!(!error.is_fatal());
    }

    #[test]
    fn only_allocation_failures_are_fatal() {
        let error = BridgeError::EngineAllocation {
            message: "out of memory".to_string(),
        };
        assert!(error.is_fatal());
    }
}
