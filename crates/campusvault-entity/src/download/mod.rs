//! Download log entity.

pub mod model;

pub use model::{CreateDownload, Download};
