//! UI module - painting helpers used by the app views

pub mod components;
