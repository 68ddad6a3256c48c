//! Local-binding variants.
//!
//! Naming: the first pair of letters describes `ask`, the second `bid`.
//! `nf` is a mutable binding, `f` a fixed one.

#![allow(unused_mut)]

/// Function signature shared by the variants
pub type LocalFn = fn() -> i32;

/// Variant descriptor
pub struct Variant {
    pub name: &'static str,
    pub description: &'static str,
    pub function: LocalFn,
}

#[inline(never)]
pub fn nfnf() -> i32 {
    let mut ask = 42;
    let mut bid = 13;

    ask - bid
}

#[inline(never)]
pub fn fnf() -> i32 {
    let ask = 42;
    let mut bid = 13;

    ask - bid
}

#[inline(never)]
pub fn nff() -> i32 {
    let mut ask = 42;
    let bid = 13;

    ask - bid
}

#[inline(never)]
pub fn ff() -> i32 {
    let ask = 42;
    let bid = 13;

    ask - bid
}

/// Returns all available variants
pub fn get_variants() -> Vec<Variant> {
    vec![
        Variant {
            name: "nfnf",
            description: "mutable ask, mutable bid",
            function: nfnf,
        },
        Variant {
            name: "fnf",
            description: "fixed ask, mutable bid",
            function: fnf,
        },
        Variant {
            name: "nff",
            description: "mutable ask, fixed bid",
            function: nff,
        },
        Variant {
            name: "ff",
            description: "fixed ask, fixed bid",
            function: ff,
        },
    ]
}
