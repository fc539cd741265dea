//! Cross-crate trait seams.

pub mod storage;
