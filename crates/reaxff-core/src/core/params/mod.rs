//! Parameter-file model: records, lookup tables, combination rules and the
//! parser that builds them.

pub mod combine;
pub mod error;
pub mod globals;
pub(crate) mod parser;
pub mod records;
pub mod section;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_fixtures;
