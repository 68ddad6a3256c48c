//! Subtracter implementations.
//!
//! `NonFinalSubtracter` keeps its implementation in a rebindable function
//! pointer and is always called through `dyn Subtracter`.
//! `FinalSubtracter` has its implementation fixed at compile time and is
//! called through a statically dispatched generic.

/// Subtraction capability shared by both variants
pub trait Subtracter: Send + Sync {
    fn sub(&self, a: i32, b: i32) -> i32;
}

pub type SubFn = fn(i32, i32) -> i32;

/// Reference implementation: 32-bit two's-complement subtraction
#[inline(never)]
pub fn wrapping_sub(a: i32, b: i32) -> i32 {
    a.wrapping_sub(b)
}

/// Subtracter whose implementation binding may be replaced after construction
#[derive(Clone, Copy)]
pub struct NonFinalSubtracter {
    op: SubFn,
}

impl NonFinalSubtracter {
    pub fn new() -> Self {
        Self { op: wrapping_sub }
    }

    /// Replace the implementation. Callers must keep it equivalent to
    /// `wrapping_sub` for results to stay comparable.
    pub fn rebind(&mut self, op: SubFn) {
        self.op = op;
    }
}

impl Default for NonFinalSubtracter {
    fn default() -> Self {
        Self::new()
    }
}

impl Subtracter for NonFinalSubtracter {
    #[inline(never)]
    fn sub(&self, a: i32, b: i32) -> i32 {
        (self.op)(a, b)
    }
}

/// Subtracter with its implementation bound once, at compile time
#[derive(Clone, Copy, Default)]
pub struct FinalSubtracter;

impl Subtracter for FinalSubtracter {
    #[inline(never)]
    fn sub(&self, a: i32, b: i32) -> i32 {
        a.wrapping_sub(b)
    }
}

/// Call through a trait object (dynamic dispatch)
#[inline(always)]
pub fn call_dynamic(subtracter: &dyn Subtracter, a: i32, b: i32) -> i32 {
    subtracter.sub(a, b)
}

/// Call through a monomorphised generic (static dispatch)
#[inline(always)]
pub fn call_static<S: Subtracter>(subtracter: &S, a: i32, b: i32) -> i32 {
    subtracter.sub(a, b)
}
