/*!
Defining the [StatementType] enum, the coarse command category of a SQL statement.
*/

use core::fmt::{self, Display};
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Command category detected from the leading keyword of a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementType {
    /// SELECT
    Select,
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
    /// REPLACE
    Replace,
    /// ALTER
    Alter,
    /// DROP
    Drop,
    /// CREATE
    Create,
    /// TRUNCATE
    Truncate,
    /// Leading keyword was missing or not recognized
    #[default]
    Unknown,
}

impl StatementType {
    /// Returns true if the statement cannot modify data or schema.
    pub fn is_read_only(&self) -> bool {
        matches!(self, StatementType::Select)
    }
    /// Returns true for schema changing statements.
    pub fn is_ddl(&self) -> bool {
        matches!(
            self,
            StatementType::Alter
                | StatementType::Drop
                | StatementType::Create
                | StatementType::Truncate
        )
    }
    /// Keyword as written in SQL
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementType::Select => "SELECT",
            StatementType::Insert => "INSERT",
            StatementType::Update => "UPDATE",
            StatementType::Delete => "DELETE",
            StatementType::Replace => "REPLACE",
            StatementType::Alter => "ALTER",
            StatementType::Drop => "DROP",
            StatementType::Create => "CREATE",
            StatementType::Truncate => "TRUNCATE",
            StatementType::Unknown => "UNKNOWN",
        }
    }
}

impl Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatementType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Ok(StatementType::Select),
            "INSERT" => Ok(StatementType::Insert),
            "UPDATE" => Ok(StatementType::Update),
            "DELETE" => Ok(StatementType::Delete),
            "REPLACE" => Ok(StatementType::Replace),
            "ALTER" => Ok(StatementType::Alter),
            "DROP" => Ok(StatementType::Drop),
            "CREATE" => Ok(StatementType::Create),
            "TRUNCATE" => Ok(StatementType::Truncate),
            "UNKNOWN" => Ok(StatementType::Unknown),
            _ => Err(Error::InvalidFormat(format!("statement type {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StatementType;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "select".parse::<StatementType>().unwrap(),
            StatementType::Select
        );
        assert_eq!(
            "Truncate".parse::<StatementType>().unwrap(),
            StatementType::Truncate
        );
        assert!("merge".parse::<StatementType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(&format!("{}", StatementType::Replace), "REPLACE");
        assert_eq!(&format!("{}", StatementType::default()), "UNKNOWN");
    }

    #[test]
    fn test_categories() {
        assert!(StatementType::Select.is_read_only());
        assert!(!StatementType::Insert.is_read_only());
        assert!(StatementType::Truncate.is_ddl());
        assert!(!StatementType::Delete.is_ddl());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&StatementType::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let parsed: StatementType = serde_json::from_str("\"ALTER\"").unwrap();
        assert_eq!(parsed, StatementType::Alter);
    }
}
