//! Subject entity.

pub mod branch;
pub mod model;

pub use model::{CreateSubject, Subject, SubjectKey, UpdateSubject};
