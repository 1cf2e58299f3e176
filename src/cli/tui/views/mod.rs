//! TUI views

pub mod compare;
