//! Hierarchical transform stack.
//!
//! The frame renderer installs the view matrix as the base, then composes
//! per-object placements with push/translate/scale/pop. A frame must leave
//! the stack exactly as it found it.

mod stack;

pub use stack::{MatrixStack, StackUnderflow};
