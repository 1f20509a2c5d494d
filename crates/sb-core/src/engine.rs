use crate::status::EngineFault;
use crate::value::TypeTag;

/// Stack-primitive contract of an embedded scripting engine.
///
/// The operand stack is the sole channel between host and interpreter.
/// Slots are addressed by `i32` index: positive counts from the bottom of
/// the stack (1 is the oldest slot), negative from the top (-1 is the
/// topmost). An environment is single-threaded; callers serialize all
/// access to it.
///
/// Push operations are infallible: an engine that cannot allocate aborts
/// the environment rather than reporting a recoverable error, because its
/// stack state after an allocation failure is unspecified.
pub trait ScriptEngine {
    fn stack_depth(&self) -> usize;

    /// Removes `count` slots from the top. Popping below an empty stack is
    /// a contract violation the engine may treat as fatal.
    fn pop(&mut self, count: usize);

    /// Tag of the slot at `index`; `Nil` for an out-of-range index.
    fn slot_tag(&self, index: i32) -> TypeTag;

    fn push_number(&mut self, value: f64);
    fn push_boolean(&mut self, value: bool);
    fn push_bytes(&mut self, bytes: &[u8]);
    fn push_nil(&mut self);

    /// `None` when the slot's tag does not match the requested type.
    fn slot_number(&self, index: i32) -> Option<f64>;
    fn slot_boolean(&self, index: i32) -> Option<bool>;

    /// Borrows engine-owned bytes. The borrow ends at the next `&mut`
    /// operation on the environment; callers needing persistence copy
    /// immediately.
    fn slot_bytes(&self, index: i32) -> Option<&[u8]>;

    /// Opaque identity of a Function or Other slot, for diagnostics only.
    fn slot_address(&self, index: i32) -> Option<usize>;

    /// Pushes the named global (Nil if unbound) and returns its tag.
    /// Always grows the stack by exactly one slot.
    fn push_global(&mut self, name: &str) -> TypeTag;

    /// Pops the top slot and binds it to the named global.
    fn bind_global(&mut self, name: &str);

    /// Pushes a host-implemented callable. The callable reads its
    /// arguments from the stack (negative indices counting down from the
    /// top), pushes exactly the number of results it declares, and returns
    /// that count; balance inside the callable is its author's concern.
    fn push_callable(&mut self, callable: fn(&mut Self) -> usize)
    where
        Self: Sized;

    /// Calls the slot `arg_count` below the top with the `arg_count` slots
    /// above it as arguments, then pushes exactly `result_count` results
    /// (padded with Nil or truncated as needed).
    ///
    /// On failure the engine restores the stack to the depth below the
    /// function slot and hands back the fault with an owned message; the
    /// caller must not pop anything further. Failures never unwind across
    /// this boundary.
    fn protected_call(
        &mut self,
        arg_count: usize,
        result_count: usize,
    ) -> Result<(), EngineFault>;
}
