//! Integration tests exercising the HTTP API against a test database.
//!
//! Set `CAMPUSVAULT_TEST_DATABASE_URL` to run these; without it every
//! test skips cleanly.

mod helpers;

mod auth_test;
mod resource_test;
mod stats_test;
mod subject_test;
