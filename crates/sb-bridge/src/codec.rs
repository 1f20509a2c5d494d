use sb_core::{BridgeError, CallValue, ScriptEngine, TypeTag};
use tracing::debug;

/// Runs one marshalling operation and, in debug builds, asserts the stack
/// balance invariant on its way out. Fatal errors are exempt: after an
/// engine allocation failure the stack state is unspecified.
pub(crate) fn with_balanced<E: ScriptEngine, T>(
    env: &mut E,
    op: impl FnOnce(&mut E) -> Result<T, BridgeError>,
) -> Result<T, BridgeError> {
    let depth = env.stack_depth();
    let result = op(env);
    if !matches!(&result, Err(error) if error.is_fatal()) {
        debug_assert_eq!(
            env.stack_depth(),
            depth,
            "marshalling operation left the operand stack unbalanced"
        );
    }
    result
}

/// Push strategy selected by the value's tag. Returns false for tags that
/// cannot cross the boundary, without touching the stack.
pub(crate) fn push_scalar<E: ScriptEngine>(env: &mut E, value: &CallValue) -> bool {
    match value {
        CallValue::Number(value) => env.push_number(*value),
        CallValue::Boolean(value) => env.push_boolean(*value),
        CallValue::String(bytes) => env.push_bytes(bytes),
        CallValue::Nil => return false,
    }
    true
}

/// Decodes the slot at `index` into an owned value; `None` for non-scalar
/// tags. Bytes are copied out before the caller pops the slot.
pub(crate) fn decode_scalar<E: ScriptEngine>(env: &E, index: i32) -> Option<CallValue> {
    match env.slot_tag(index) {
        TypeTag::Number => env.slot_number(index).map(CallValue::Number),
        TypeTag::Boolean => env.slot_boolean(index).map(CallValue::Boolean),
        TypeTag::String => env
            .slot_bytes(index)
            .map(|bytes| CallValue::String(bytes.to_vec())),
        _ => None,
    }
}

fn read_global<E: ScriptEngine>(
    env: &mut E,
    name: &str,
    expected: TypeTag,
) -> Result<CallValue, BridgeError> {
    with_balanced(env, |env| {
        let found = env.push_global(name);
        if found != expected {
            // The lookup pushed one slot; the mismatch branch owes the same
            // pop as the success branch.
            env.pop(1);
            debug!(
                name,
                expected = expected.name(),
                found = found.name(),
                "global read type mismatch"
            );
            return Err(BridgeError::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            });
        }
        let value = decode_scalar(env, -1).expect("tag-checked scalar slot should decode");
        env.pop(1);
        Ok(value)
    })
}

pub fn read_number<E: ScriptEngine>(env: &mut E, name: &str) -> Result<f64, BridgeError> {
    let value = read_global(env, name, TypeTag::Number)?;
    Ok(value.as_number().expect("number read should yield a number"))
}

pub fn read_boolean<E: ScriptEngine>(env: &mut E, name: &str) -> Result<bool, BridgeError> {
    let value = read_global(env, name, TypeTag::Boolean)?;
    Ok(value
        .as_boolean()
        .expect("boolean read should yield a boolean"))
}

/// Length-aware read: byte-exact, embedded NUL bytes included. The bytes
/// are copied out of engine memory before the slot is popped.
pub fn read_bytes<E: ScriptEngine>(env: &mut E, name: &str) -> Result<Vec<u8>, BridgeError> {
    let value = read_global(env, name, TypeTag::String)?;
    match value {
        CallValue::String(bytes) => Ok(bytes),
        _ => unreachable!("string read should yield bytes"),
    }
}

/// Convenience text read; non-UTF-8 byte sequences are replaced lossily,
/// matching the original engine's unvalidated string accessor. Use
/// [`read_bytes`] when exact bytes matter.
pub fn read_string<E: ScriptEngine>(env: &mut E, name: &str) -> Result<String, BridgeError> {
    let bytes = read_bytes(env, name)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// Writes are balanced by construction: binding consumes the pushed slot.
// There is no error path; an engine that cannot allocate is already dead.

pub fn write_number<E: ScriptEngine>(env: &mut E, name: &str, value: f64) {
    env.push_number(value);
    env.bind_global(name);
}

pub fn write_boolean<E: ScriptEngine>(env: &mut E, name: &str, value: bool) {
    env.push_boolean(value);
    env.bind_global(name);
}

pub fn write_string<E: ScriptEngine>(env: &mut E, name: &str, value: &str) {
    env.push_bytes(value.as_bytes());
    env.bind_global(name);
}

pub fn write_bytes<E: ScriptEngine>(env: &mut E, name: &str, bytes: &[u8]) {
    env.push_bytes(bytes);
    env.bind_global(name);
}
