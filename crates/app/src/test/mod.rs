//! Test support shared by the database-backed service tests.

mod db;

pub(crate) use context::TestContext;
