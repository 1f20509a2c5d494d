//! Minimal host embedding walk: seed globals, read them back, call a
//! script-defined function, expose a host callable, and render diagnostics.

use sb_bridge::{
    bind_callable, call_global, describe_stack, fault_line, read_boolean, read_number,
    read_string, write_boolean, write_number, write_string, BridgeError, CallDescriptor,
    EngineFault, ScriptEngine, StatusCode, TypeTag,
};
use sb_engine::ScriptEnvironment;

fn sign(env: &mut ScriptEnvironment) -> usize {
    let x = env.slot_number(-1).unwrap_or(0.0);
    env.push_number(if x == 0.0 { 0.0 } else { x / x.abs() });
    1
}

fn main() -> Result<(), BridgeError> {
    let mut env = ScriptEnvironment::new();

    // Script loading belongs to the embedding application; a loaded script
    // is stood in for by engine-level function definitions.
    env.define_function("scale", |env| {
        let factor = read_number(env, "host_num").map_err(|error| error.to_string())?;
        let value = env.slot_number(-1).ok_or("scale: argument is not a number")?;
        env.push_number(value * factor);
        Ok(1)
    });

    write_number(&mut env, "host_num", 2.5);
    write_boolean(&mut env, "host_bool", true);
    write_string(&mut env, "host_str", "host string hello");

    println!("host_num  = {}", read_number(&mut env, "host_num")?);
    println!("host_bool = {}", read_boolean(&mut env, "host_bool")?);
    println!("host_str  = {}", read_string(&mut env, "host_str")?);

    let scaled = call_global(
        &mut env,
        "scale",
        &CallDescriptor::returning(TypeTag::Number).arg(4.0),
    )?;
    println!("scale(4)  = {:?}", scaled.as_number());

    bind_callable(&mut env, "sign", sign);
    let signed = call_global(
        &mut env,
        "sign",
        &CallDescriptor::returning(TypeTag::Number).arg(-5.0),
    )?;
    println!("sign(-5)  = {:?}", signed.as_number());

    env.push_number(1.5);
    env.push_boolean(false);
    print!("stack:\n{}", describe_stack(&env, 8));
    env.pop(2);

    match call_global(
        &mut env,
        "no_such_function",
        &CallDescriptor::returning(TypeTag::Number),
    ) {
        Ok(_) => unreachable!("the global is unbound"),
        Err(error) => println!("expected failure: {}", error),
    }

    let fault = EngineFault::new(StatusCode::SyntaxError, "unexpected symbol near 'end'");
    println!("{}", fault_line("load_script", &fault));

    Ok(())
}
