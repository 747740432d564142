//! glyphcast library crate.
//!
//! Converts RGBA pixel buffers into ASCII or braille text. The [`ascii`]
//! module holds the rendering pipeline, [`worker`] runs it off the caller's
//! thread, and [`config`]/[`cli`] back the `glyphcast` binary.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod worker;
