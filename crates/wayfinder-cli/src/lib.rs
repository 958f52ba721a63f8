//! Wayfinder CLI library.
//!
//! Output formatting shared by the `wayfinder` subcommands.

pub mod output;
