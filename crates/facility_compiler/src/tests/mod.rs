//! Whole-compile scenario tests

mod scenarios;
mod determinism;
