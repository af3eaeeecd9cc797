//! Data module - Text input and analysis result set

mod input;
mod result_set;

pub use input::{count_lines, parse_lines, InputError};
pub use result_set::{ProcessTextsRequest, ProjectionResponse, ResultSet, ResultSetError};

#[cfg(test)]
pub(crate) use result_set::fixtures;
