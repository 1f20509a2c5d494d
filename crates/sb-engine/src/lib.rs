mod environment;

pub use environment::{ScriptEnvironment, ScriptFnResult};
