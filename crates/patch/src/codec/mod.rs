//! Codecs for patch sets.

pub mod json;
