//! Domain model - the documents this system persists.

pub mod record;
