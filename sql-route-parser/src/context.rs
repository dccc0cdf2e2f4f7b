/*!
Defining the [Context] that collects the result of a parse and the [TableReference]s it holds.
*/

use core::fmt::{self, Display};

use derive_getters::Getters;
use itertools::Itertools;
use serde_derive::{Deserialize, Serialize};

use crate::{error::Error, statement::StatementType};

/// Seperator between schema and table name.
pub static SEPARATOR: &str = ".";

/// One occurrence of a table in the statement text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct TableReference {
    /// Schema, only present if the statement qualifies the table explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    /// Table or view name without quoting
    table: String,
}

impl TableReference {
    /// Create new table reference
    pub fn new(schema: Option<&str>, table: &str) -> Self {
        Self {
            schema: schema.map(ToOwned::to_owned),
            table: table.to_owned(),
        }
    }

    pub(crate) fn from_parts(schema: Option<String>, table: String) -> Self {
        Self { schema, table }
    }
}

impl Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}{}{}", schema, SEPARATOR, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// Output of a single parse: the statement type and every table reference in textual order.
///
/// A context is created empty by the caller and filled by [`Parser::parse`](crate::Parser::parse).
/// Reusing it for another statement requires [`Context::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    statement_type: StatementType,
    references: Vec<TableReference>,
}

impl Context {
    /// Create empty context
    pub fn new() -> Self {
        Self::default()
    }
    /// Statement type of the parsed statement
    pub fn statement_type(&self) -> StatementType {
        self.statement_type
    }
    /// Number of recorded table references
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }
    /// Returns true if no table reference was recorded
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
    /// Schema of the reference at `index`, `None` for unqualified tables
    pub fn schema_at(&self, index: usize) -> Result<Option<&str>, Error> {
        self.reference_at(index)
            .map(|reference| reference.schema().as_deref())
    }
    /// Table name of the reference at `index`
    pub fn table_at(&self, index: usize) -> Result<&str, Error> {
        self.reference_at(index)
            .map(|reference| reference.table().as_str())
    }
    /// Reference at `index`
    pub fn reference_at(&self, index: usize) -> Result<&TableReference, Error> {
        self.references
            .get(index)
            .ok_or(Error::IndexOutOfBounds(index, self.references.len()))
    }
    /// All references in the order they appear in the statement
    pub fn references(&self) -> &[TableReference] {
        &self.references
    }
    /// Iterate over `(schema, table)` pairs
    pub fn tables(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.references
            .iter()
            .map(|reference| (reference.schema().as_deref(), reference.table().as_str()))
    }
    /// Clear all references and forget the statement type
    pub fn reset(&mut self) {
        self.statement_type = StatementType::Unknown;
        self.references.clear();
    }

    /// The statement type is detected once; later calls keep the first detected type.
    pub(crate) fn set_statement_type(&mut self, statement_type: StatementType) {
        if self.statement_type == StatementType::Unknown {
            self.statement_type = statement_type;
        }
    }

    pub(crate) fn push(&mut self, reference: TableReference) {
        self.references.push(reference);
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.statement_type,
            self.references.iter().join(", ")
        )
    }
}
