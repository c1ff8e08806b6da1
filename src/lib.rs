//! Core library for the sdrt-conv command line application.
//!
//! The library turns a radio playlist document into the flat tables other
//! tools consume. Document types live under [`sdrt::conv::model`], readers
//! and table writers inside [`sdrt::conv::io`], priority derivation in
//! [`sdrt::conv::derive`], and the run orchestration under
//! [`sdrt::conv::convert`].

pub mod sdrt;

pub use sdrt::conv::{Result, ToolError, convert, derive, error, io, logging, model};
