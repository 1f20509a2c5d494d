use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use sb_core::{EngineFault, ScriptEngine, TypeTag};

/// Outcome of an engine-level function body: number of results pushed, or
/// an error message the engine turns into a runtime fault.
pub type ScriptFnResult = Result<usize, String>;

type EngineFn = Rc<dyn Fn(&mut ScriptEnvironment) -> ScriptFnResult>;

#[derive(Clone)]
enum Slot {
    Nil,
    Boolean(bool),
    Number(f64),
    String(Vec<u8>),
    Function(EngineFn),
}

impl Slot {
    fn tag(&self) -> TypeTag {
        match self {
            Self::Nil => TypeTag::Nil,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Function(_) => TypeTag::Function,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::String(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Self::Function(func) => {
                write!(f, "function(0x{:x})", Rc::as_ptr(func) as *const () as usize)
            }
        }
    }
}

/// In-memory reference engine: an operand stack plus named globals.
///
/// Stands in for a real interpreter in tests and demos. Script loading and
/// bytecode execution are out of scope; functions "defined by a script" are
/// modelled with [`ScriptEnvironment::define_function`]. Not `Send`: one
/// environment belongs to one thread for its whole life.
pub struct ScriptEnvironment {
    stack: Vec<Slot>,
    globals: BTreeMap<String, Slot>,
}

impl Default for ScriptEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEnvironment {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            globals: BTreeMap::new(),
        }
    }

    /// Binds an engine-level function to a global name, the way a loaded
    /// script would. The body may fail with a message; `protected_call`
    /// converts that into a runtime fault.
    pub fn define_function(
        &mut self,
        name: &str,
        body: impl Fn(&mut ScriptEnvironment) -> ScriptFnResult + 'static,
    ) {
        self.globals
            .insert(name.to_string(), Slot::Function(Rc::new(body)));
    }

    fn resolve(&self, index: i32) -> Option<usize> {
        let depth = self.stack.len();
        if index > 0 {
            let position = (index as usize) - 1;
            (position < depth).then_some(position)
        } else if index < 0 {
            let back = index.unsigned_abs() as usize;
            (back <= depth).then(|| depth - back)
        } else {
            None
        }
    }

    fn slot(&self, index: i32) -> Option<&Slot> {
        self.resolve(index).map(|position| &self.stack[position])
    }
}

impl ScriptEngine for ScriptEnvironment {
    fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn pop(&mut self, count: usize) {
        assert!(
            count <= self.stack.len(),
            "pop({}) exceeds the operand stack depth",
            count
        );
        self.stack.truncate(self.stack.len() - count);
    }

    fn slot_tag(&self, index: i32) -> TypeTag {
        self.slot(index).map_or(TypeTag::Nil, Slot::tag)
    }

    fn push_number(&mut self, value: f64) {
        self.stack.push(Slot::Number(value));
    }

    fn push_boolean(&mut self, value: bool) {
        self.stack.push(Slot::Boolean(value));
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.stack.push(Slot::String(bytes.to_vec()));
    }

    fn push_nil(&mut self) {
        self.stack.push(Slot::Nil);
    }

    fn slot_number(&self, index: i32) -> Option<f64> {
        match self.slot(index) {
            Some(Slot::Number(value)) => Some(*value),
            _ => None,
        }
    }

    fn slot_boolean(&self, index: i32) -> Option<bool> {
        match self.slot(index) {
            Some(Slot::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    fn slot_bytes(&self, index: i32) -> Option<&[u8]> {
        match self.slot(index) {
            Some(Slot::String(bytes)) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    fn slot_address(&self, index: i32) -> Option<usize> {
        match self.slot(index) {
            Some(Slot::Function(func)) => Some(Rc::as_ptr(func) as *const () as usize),
            _ => None,
        }
    }

    fn push_global(&mut self, name: &str) -> TypeTag {
        let slot = self.globals.get(name).cloned().unwrap_or(Slot::Nil);
        let tag = slot.tag();
        self.stack.push(slot);
        tag
    }

    fn bind_global(&mut self, name: &str) {
        let slot = self
            .stack
            .pop()
            .expect("bind_global requires a pushed value");
        self.globals.insert(name.to_string(), slot);
    }

    fn push_callable(&mut self, callable: fn(&mut Self) -> usize) {
        self.stack
            .push(Slot::Function(Rc::new(move |env| Ok(callable(env)))));
    }

    fn protected_call(
        &mut self,
        arg_count: usize,
        result_count: usize,
    ) -> Result<(), EngineFault> {
        assert!(
            arg_count < self.stack.len(),
            "protected_call needs a function slot under {} arguments",
            arg_count
        );
        let base = self.stack.len() - arg_count - 1;

        let body = match &self.stack[base] {
            Slot::Function(func) => Rc::clone(func),
            other => {
                let fault =
                    EngineFault::runtime(format!("attempt to call a {} value", other.tag().name()));
                self.stack.truncate(base);
                return Err(fault);
            }
        };

        match body(self) {
            Ok(returned) => {
                assert!(
                    base + returned <= self.stack.len(),
                    "callee declared {} results it did not push",
                    returned
                );
                // Shift the results down over the function and arguments.
                self.stack.drain(base..self.stack.len() - returned);
                self.stack.resize(base + result_count, Slot::Nil);
                Ok(())
            }
            Err(message) => {
                self.stack.truncate(base);
                Err(EngineFault::runtime(message))
            }
        }
    }
}
