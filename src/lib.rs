//! `fontset` builds and inspects glyph outline containers from TrueType and
//! OpenType fonts. The container format itself lives in `fontset_core`.

pub mod cli;
pub mod config;
pub mod dump;
pub mod engine;
pub mod logging;
