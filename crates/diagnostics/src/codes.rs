//! Diagnostic ID constants.
//!
//! Generated from `spec/diagnostics.json` at build time.

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));
