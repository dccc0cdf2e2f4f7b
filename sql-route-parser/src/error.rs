/*!
Error type for the sql route parser
*/

use thiserror::Error;

#[derive(Error, Debug)]
/// Sql route parser error
pub enum Error {
    /// Accessor called with an index past the recorded references
    #[error("Index {0} is out of bounds for {1} table references.")]
    IndexOutOfBounds(usize, usize),
    /// Invalid format
    #[error("{0} doesn't have the right format")]
    InvalidFormat(String),
    /// derive builder
    #[error(transparent)]
    DeriveBuilder(#[from] derive_builder::UninitializedFieldError),
}
