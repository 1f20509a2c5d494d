pub mod engine;
pub mod error;
pub mod status;
pub mod value;

pub use engine::ScriptEngine;
pub use error::BridgeError;
pub use status::{EngineFault, StatusCode};
pub use value::{CallValue, TypeTag};
