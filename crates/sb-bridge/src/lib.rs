mod codec;
mod diagnostics;
mod globals;
mod invoker;


pub use codec::{
    read_boolean, read_bytes, read_number, read_string, write_boolean, write_bytes, write_number,
    write_string,
};
pub use diagnostics::{describe_stack, fault_line, status_description};
pub use globals::{bind_callable, global_tag};
pub use invoker::{call_global, CallDescriptor};

pub use sb_core::{BridgeError, CallValue, EngineFault, ScriptEngine, StatusCode, TypeTag};
