// Translator services
// Services wrap collaborators: the translation server, clipboard, renderer, config, time formatting.

pub mod clipboard;
pub mod config_engine;
pub mod renderer;
pub mod time_format;
pub mod translation_api;
