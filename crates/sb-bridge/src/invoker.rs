use sb_core::{BridgeError, CallValue, ScriptEngine, StatusCode, TypeTag};
use tracing::{debug, trace};

use crate::codec::{decode_scalar, push_scalar, with_balanced};

/// One call across the boundary: an ordered, type-tagged argument sequence
/// plus the expected return tag. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    args: Vec<CallValue>,
    expected_return: TypeTag,
}

impl CallDescriptor {
    pub fn returning(expected_return: TypeTag) -> Self {
        Self {
            args: Vec::new(),
            expected_return,
        }
    }

    pub fn arg(mut self, value: impl Into<CallValue>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn args(&self) -> &[CallValue] {
        &self.args
    }

    pub fn expected_return(&self) -> TypeTag {
        self.expected_return
    }
}

/// Resolves a callable global, marshals the arguments, invokes it under the
/// engine's protected call, and decodes the single return value.
///
/// Every recoverable exit leaves the operand stack at its entry depth.
pub fn call_global<E: ScriptEngine>(
    env: &mut E,
    name: &str,
    descriptor: &CallDescriptor,
) -> Result<CallValue, BridgeError> {
    with_balanced(env, |env| {
        let expected = descriptor.expected_return;
        if !expected.is_scalar() {
            return Err(BridgeError::InvalidReturnType {
                requested: expected,
            });
        }

        trace!(name, args = descriptor.args.len(), "invoking script function");

        let found = env.push_global(name);
        if found != TypeTag::Function {
            env.pop(1);
            debug!(name, found = found.name(), "callable global not found");
            return Err(BridgeError::FunctionNotFound {
                name: name.to_string(),
                found,
            });
        }

        for (position, argument) in descriptor.args.iter().enumerate() {
            if !push_scalar(env, argument) {
                // Unwind the partial marshal: the arguments pushed so far
                // plus the function slot.
                env.pop(position + 1);
                debug!(
                    name,
                    position,
                    found = argument.tag().name(),
                    "unsupported call argument"
                );
                return Err(BridgeError::InvalidParameterType {
                    position,
                    found: argument.tag(),
                });
            }
        }

        if let Err(fault) = env.protected_call(descriptor.args.len(), 1) {
            // The engine already consumed the function and arguments per
            // its call-failure contract; popping here would double-pop.
            debug!(name, status = fault.status.raw(), message = fault.message.as_str(), "protected call failed");
            return Err(match fault.status {
                StatusCode::MemoryError => BridgeError::EngineAllocation {
                    message: fault.message,
                },
                _ => BridgeError::ProtectedCall {
                    name: name.to_string(),
                    fault,
                },
            });
        }

        let returned = env.slot_tag(-1);
        if returned != expected {
            env.pop(1);
            debug!(
                name,
                expected = expected.name(),
                found = returned.name(),
                "return type mismatch"
            );
            return Err(BridgeError::ReturnTypeMismatch {
                name: name.to_string(),
                expected,
                found: returned,
            });
        }

        let value = decode_scalar(env, -1).expect("tag-checked return slot should decode");
        env.pop(1);
        Ok(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_collects_arguments_in_order() {
        let descriptor = CallDescriptor::returning(TypeTag::Number)
            .arg(1.0)
            .arg(true)
            .arg("three");
        assert_eq!(descriptor.expected_return(), TypeTag::Number);
        assert_eq!(
            descriptor.args(),
            &[
                CallValue::Number(1.0),
                CallValue::Boolean(true),
                CallValue::String(b"three".to_vec()),
            ]
        );
    }
}
