use sb_core::{ScriptEngine, TypeTag};

/// Binds a host-implemented callable to a global name, making it reachable
/// from script code. The callable follows the engine's call ABI: read
/// arguments at negative stack indices, push the declared results, return
/// their count. Balance inside the callable is the author's responsibility.
pub fn bind_callable<E: ScriptEngine>(env: &mut E, name: &str, callable: fn(&mut E) -> usize) {
    env.push_callable(callable);
    env.bind_global(name);
}

/// Inspects a global's tag without decoding it.
pub fn global_tag<E: ScriptEngine>(env: &mut E, name: &str) -> TypeTag {
    let tag = env.push_global(name);
    env.pop(1);
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::write_number;
    use sb_engine::ScriptEnvironment;

    #[test]
    fn global_tag_reports_without_disturbing_the_stack() {
        let mut env = ScriptEnvironment::new();
        write_number(&mut env, "x", 1.0);
        assert_eq!(global_tag(&mut env, "x"), TypeTag::Number);
        assert_eq!(global_tag(&mut env, "missing"), TypeTag::Nil);
        assert_eq!(env.stack_depth(), 0);
    }

    #[test]
    fn bound_callable_is_a_function_global() {
        fn noop(_env: &mut ScriptEnvironment) -> usize {
            0
        }

        let mut env = ScriptEnvironment::new();
        bind_callable(&mut env, "noop", noop);
        assert_eq!(global_tag(&mut env, "noop"), TypeTag::Function);
        assert_eq!(env.stack_depth(), 0);
    }
}
