//! Record type unit tests

pub mod raw_records;
