// Translator shared type definitions
// Each submodule defines types used across the client.

pub mod config;
pub mod errors;
pub mod history;
pub mod language;
pub mod preferences;
pub mod session;
pub mod translation;
