//! Parameter-binding variants: the same four combinations as the locals,
//! applied to the method parameters instead.

#![allow(unused_mut)]

pub type ParamFn = fn(i32, i32) -> i32;

/// Variant descriptor
pub struct Variant {
    pub name: &'static str,
    pub description: &'static str,
    pub function: ParamFn,
}

#[inline(never)]
pub fn nfnf(mut ask: i32, mut bid: i32) -> i32 {
    ask.wrapping_sub(bid)
}

#[inline(never)]
pub fn fnf(ask: i32, mut bid: i32) -> i32 {
    ask.wrapping_sub(bid)
}

#[inline(never)]
pub fn nff(mut ask: i32, bid: i32) -> i32 {
    ask.wrapping_sub(bid)
}

#[inline(never)]
pub fn ff(ask: i32, bid: i32) -> i32 {
    ask.wrapping_sub(bid)
}

/// Returns all available variants
pub fn get_variants() -> Vec<Variant> {
    vec![
        Variant {
            name: "p_nfnf",
            description: "mutable ask parameter, mutable bid parameter",
            function: nfnf,
        },
        Variant {
            name: "p_fnf",
            description: "fixed ask parameter, mutable bid parameter",
            function: fnf,
        },
        Variant {
            name: "p_nff",
            description: "mutable ask parameter, fixed bid parameter",
            function: nff,
        },
        Variant {
            name: "p_ff",
            description: "fixed ask parameter, fixed bid parameter",
            function: ff,
        },
    ]
}
