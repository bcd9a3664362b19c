//! Core player status domain: records, the snapshot store and the differ.

pub mod differ;
pub mod record;
pub mod store;
