//! Lightweight SQL statement classifier and table reference extractor
//!
//! This crate answers two questions about a raw SQL statement without building a syntax
//! tree, which is what a routing or sharding layer in front of a database needs to pick
//! the backend a query goes to:
//!
//! * What kind of statement is it ([`StatementType`])
//! * Which `(schema, table)` pairs does it reference, in textual order and across nested
//!   subqueries ([`TableReference`])
//!
//! The statement is read as a byte buffer in a single pass per nesting level. Comments
//! (`#`, `-- ` and `/* */`) and quoted text (`'...'`, `"..."`, `` `...` ``) are never
//! mistaken for table names, and function calls are skipped as opaque spans.
//!
//! # Components
//!
//! * [`scanner`] - Byte level cursor that skips comments, quotes and balanced parentheses
//! * [`parser`] - Statement classification and table extraction
//! * [`context`] - Output of a parse
//! * [`statement`] - Statement types
//! * [`error`] - Error types and handling
//!
//! # Example
//!
//! ```rust
//! use sql_route_parser::{Context, Parser, StatementType};
//!
//! let mut context = Context::new();
//! Parser::default().parse(
//!     b"SELECT a.*, b.* FROM shop.orders a JOIN customers b ON a.customer = b.id",
//!     &mut context,
//! );
//!
//! assert_eq!(context.statement_type(), StatementType::Select);
//! assert_eq!(context.reference_count(), 2);
//! assert_eq!(context.schema_at(0).unwrap(), Some("shop"));
//! assert_eq!(context.table_at(1).unwrap(), "customers");
//! ```

pub mod context;
pub mod error;
pub(crate) mod keyword;
pub mod parser;
pub mod scanner;
pub mod statement;

pub use context::{Context, TableReference};
pub use error::Error;
pub use parser::{parse, parse_sql, ParseOptions, ParseOptionsBuilder, Parser};
pub use statement::StatementType;
