use glam::{Mat4, Vec3};

/// Error returned when `pop` would remove the base matrix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StackUnderflow;

impl std::fmt::Display for StackUnderflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("matrix stack underflow: pop without matching push")
    }
}

impl std::error::Error for StackUnderflow {}

/// Stack of 4x4 model-view matrices.
///
/// The top is the current composed transform. `translate`/`scale`
/// right-multiply the top, so nested placements compose parent-to-child.
///
/// Invariant: every `push` inside a drawing routine is matched by exactly one
/// `pop` before the routine returns. Use [`saved`] to hold that invariant
/// across early exits; an unmatched pair corrupts every subsequent frame.
///
/// [`saved`]: MatrixStack::saved
#[derive(Debug, Clone)]
pub struct MatrixStack {
    matrices: Vec<Mat4>,
}

impl MatrixStack {
    /// Creates a stack holding a single identity matrix.
    pub fn new() -> Self {
        Self {
            matrices: vec![Mat4::IDENTITY],
        }
    }

    /// Returns the current composed transform (the top of the stack).
    #[inline]
    pub fn current(&self) -> Mat4 {
        // The base matrix is never popped, so the stack is never empty.
        *self
            .matrices
            .last()
            .unwrap_or(&Mat4::IDENTITY)
    }

    /// Returns the stack depth (number of matrices, base included).
    #[inline]
    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    /// Duplicates the current top onto the stack.
    pub fn push(&mut self) {
        self.matrices.push(self.current());
    }

    /// Removes the top matrix.
    ///
    /// Fails when only the base remains: that means a `pop` without a
    /// matching `push`, which is a bug in the drawing routine.
    pub fn pop(&mut self) -> Result<(), StackUnderflow> {
        if self.matrices.len() <= 1 {
            return Err(StackUnderflow);
        }
        self.matrices.pop();
        Ok(())
    }

    /// Replaces the top with `m`.
    ///
    /// Used once per frame to install the view matrix as the base.
    pub fn load(&mut self, m: Mat4) {
        if let Some(top) = self.matrices.last_mut() {
            *top = m;
        }
    }

    /// Right-multiplies the top by a translation.
    pub fn translate(&mut self, v: Vec3) {
        if let Some(top) = self.matrices.last_mut() {
            *top *= Mat4::from_translation(v);
        }
    }

    /// Right-multiplies the top by a non-uniform scale.
    pub fn scale(&mut self, v: Vec3) {
        if let Some(top) = self.matrices.last_mut() {
            *top *= Mat4::from_scale(v);
        }
    }

    /// Runs `f` between a matched push/pop pair.
    ///
    /// The pop happens regardless of how `f` returns, so drawing routines
    /// with early exits cannot unbalance the stack.
    pub fn saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let result = f(self);
        // The matching push above guarantees this pop cannot underflow.
        let _ = self.pop();
        result
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mats_close(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn matched_push_pop_round_trips_depth_and_top() {
        let mut stack = MatrixStack::new();
        stack.load(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let before_depth = stack.depth();
        let before_top = stack.current();

        stack.push();
        stack.translate(Vec3::X);
        stack.push();
        stack.scale(Vec3::splat(2.0));
        stack.pop().unwrap();
        stack.pop().unwrap();

        assert_eq!(stack.depth(), before_depth);
        assert!(mats_close(stack.current(), before_top));
    }

    #[test]
    fn pop_on_base_underflows() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.pop(), Err(StackUnderflow));

        stack.push();
        assert_eq!(stack.pop(), Ok(()));
        assert_eq!(stack.pop(), Err(StackUnderflow));
    }

    #[test]
    fn translate_then_scale_composes_right_to_left() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::new(0.0, 1.0, 0.0));
        stack.scale(Vec3::splat(0.5));

        // Point at origin: scaled first (no-op on origin), then translated.
        let p = stack.current().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);

        // Unit X: scale halves it, translation lifts it.
        let q = stack.current().transform_point3(Vec3::X);
        assert!((q - Vec3::new(0.5, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn saved_restores_depth_and_top() {
        let mut stack = MatrixStack::new();
        let before = stack.current();

        let value = stack.saved(|s| {
            s.translate(Vec3::splat(4.0));
            s.saved(|s| s.scale(Vec3::splat(0.1)));
            42
        });

        assert_eq!(value, 42);
        assert_eq!(stack.depth(), 1);
        assert!(mats_close(stack.current(), before));
    }

    #[test]
    fn load_replaces_only_the_top() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.load(Mat4::from_scale(Vec3::splat(3.0)));
        stack.pop().unwrap();
        assert!(mats_close(stack.current(), Mat4::IDENTITY));
    }
}
