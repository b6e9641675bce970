//! Command line interface for the Jocosa classifier.

pub mod args;

pub use args::*;
