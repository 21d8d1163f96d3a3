//! Property-based tests for command assembly and menu parsing

mod command_builder;
