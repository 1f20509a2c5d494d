use sb_core::{EngineFault, ScriptEngine, StatusCode, TypeTag};

/// Fixed rendering of an engine status. Total over the engine's closed
/// status set; an `Unknown` status is a broken engine contract, so this
/// panics rather than inventing a description.
pub fn status_description(status: StatusCode) -> &'static str {
    match status {
        StatusCode::Ok => "OK",
        StatusCode::Yield => "THREAD YIELDS",
        StatusCode::RuntimeError => "RUNTIME ERROR",
        StatusCode::SyntaxError => "SYNTAX ERROR",
        StatusCode::MemoryError => "MEMORY ALLOCATION ERROR",
        StatusCode::HandlerError => "ERROR RUNNING MESSAGE HANDLER",
        StatusCode::FileError => "FILE ERROR",
        StatusCode::Unknown(raw) => {
            panic!("status code {} is outside the engine's contract", raw)
        }
    }
}

/// One-line rendering of a failed engine operation, for the embedder's log.
pub fn fault_line(operation: &str, fault: &EngineFault) -> String {
    format!(
        "{} failed: {} ({})",
        operation,
        fault.message,
        status_description(fault.status)
    )
}

/// Human-readable dump of the `max_depth` topmost stack slots, one line per
/// slot with its absolute index, tag, and a type-appropriate rendering.
/// Read-only; the stack is not disturbed.
pub fn describe_stack<E: ScriptEngine>(env: &E, max_depth: usize) -> String {
    let depth = env.stack_depth();
    let mut out = String::new();
    for back in 1..=max_depth.min(depth) {
        let index = -(back as i32);
        let position = depth - back + 1;
        let tag = env.slot_tag(index);
        let rendering = match tag {
            TypeTag::Number => env
                .slot_number(index)
                .map(|value| value.to_string())
                .unwrap_or_default(),
            TypeTag::Boolean => env
                .slot_boolean(index)
                .map(|value| value.to_string())
                .unwrap_or_default(),
            TypeTag::String => env
                .slot_bytes(index)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default(),
            TypeTag::Nil => "nil".to_string(),
            TypeTag::Function | TypeTag::Other => match env.slot_address(index) {
                Some(address) => format!("0x{:x}", address),
                None => "opaque".to_string(),
            },
        };
        out.push_str(&format!("{}\t{}\t{}\n", position, tag.name(), rendering));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_engine::ScriptEnvironment;

    #[test]
    fn descriptions_cover_the_closed_status_set() {
        assert_eq!(status_description(StatusCode::Ok), "OK");
        assert_eq!(status_description(StatusCode::Yield), "THREAD YIELDS");
        assert_eq!(status_description(StatusCode::RuntimeError), "RUNTIME ERROR");
        assert_eq!(status_description(StatusCode::SyntaxError), "SYNTAX ERROR");
        assert_eq!(
            status_description(StatusCode::MemoryError),
            "MEMORY ALLOCATION ERROR"
        );
        assert_eq!(
            status_description(StatusCode::HandlerError),
            "ERROR RUNNING MESSAGE HANDLER"
        );
        assert_eq!(status_description(StatusCode::FileError), "FILE ERROR");
    }

    #[test]
    #[should_panic(expected = "outside the engine's contract")]
    fn unknown_status_is_a_programming_error() {
        status_description(StatusCode::Unknown(99));
    }

    #[test]
    fn fault_line_names_operation_message_and_status() {
        let fault = EngineFault::new(StatusCode::SyntaxError, "unexpected symbol");
        assert_eq!(
            fault_line("load_script", &fault),
            "load_script failed: unexpected symbol (SYNTAX ERROR)"
        );
    }

    #[test]
    fn stack_dump_renders_each_tag_its_own_way() {
        let mut env = ScriptEnvironment::new();
        env.define_function("f", |_| Ok(0));
        env.push_number(1.5);
        env.push_boolean(false);
        env.push_bytes(b"hello");
        env.push_nil();
        env.push_global("f");

        let dump = describe_stack(&env, 16);
        let lines = dump.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("5\tfunction\t0x"));
        assert_eq!(lines[1], "4\tnil\tnil");
        assert_eq!(lines[2], "3\tstring\thello");
        assert_eq!(lines[3], "2\tboolean\tfalse");
        assert_eq!(lines[4], "1\tnumber\t1.5");
    }

    #[test]
    fn stack_dump_honors_max_depth_and_leaves_stack_alone() {
        let mut env = ScriptEnvironment::new();
        env.push_number(1.0);
        env.push_number(2.0);
        env.push_number(3.0);

        let dump = describe_stack(&env, 2);
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.starts_with("3\tnumber\t3"));
        assert_eq!(env.stack_depth(), 3);

        assert!(describe_stack(&ScriptEnvironment::new(), 8).is_empty());
    }
}
