#![forbid(unsafe_code)]

//! `sirenia` is a headless live-preview engine for Mermaid diagrams and Markdown documents.
//!
//! The core (viewport navigation, content geometry, scroll mirroring, render scheduling and
//! session persistence) is re-exported from `sirenia-core`. [`Studio`] wires those pieces to a
//! diagram engine and a Markdown renderer supplied by the host.
//!
//! # Features
//!
//! - `export`: SVG/PNG/JPG export via pure-Rust rasterization (`sirenia::export`)

pub use sirenia_core::*;

#[cfg(feature = "export")]
pub use sirenia_export as export;

mod error;
mod studio;

pub use error::StudioError;
pub use studio::Studio;
