/*!
Keywords the extractor reacts to. Everything else is an identifier.
*/

use crate::statement::StatementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Select,
    Insert,
    Update,
    Delete,
    Replace,
    Alter,
    Drop,
    Create,
    Truncate,
    With,
    Recursive,
    From,
    Join,
    StraightJoin,
    Left,
    Right,
    Inner,
    Outer,
    Cross,
    Natural,
    Full,
    As,
    Dual,
    Where,
    On,
    Using,
    Set,
    Group,
    Order,
    By,
    Having,
    Limit,
    Offset,
    Union,
    Except,
    Intersect,
    Window,
    For,
    Lock,
    Into,
    Procedure,
    Returning,
    Values,
    Value,
    Partition,
    Use,
    Force,
    Ignore,
    Index,
    Key,
    Table,
    Temporary,
    If,
    Not,
    Exists,
    Or,
    LowPriority,
    Delayed,
    HighPriority,
    Quick,
    Online,
    Offline,
    View,
    Unique,
    Fulltext,
    Spatial,
    Database,
    Schema,
    Trigger,
    All,
    Distinct,
    Distinctrow,
    SqlSmallResult,
    SqlBigResult,
    SqlBufferResult,
    SqlCache,
    SqlNoCache,
    SqlCalcFoundRows,
}

static KEYWORDS: &[(&str, Keyword)] = &[
    ("SELECT", Keyword::Select),
    ("INSERT", Keyword::Insert),
    ("UPDATE", Keyword::Update),
    ("DELETE", Keyword::Delete),
    ("REPLACE", Keyword::Replace),
    ("ALTER", Keyword::Alter),
    ("DROP", Keyword::Drop),
    ("CREATE", Keyword::Create),
    ("TRUNCATE", Keyword::Truncate),
    ("WITH", Keyword::With),
    ("RECURSIVE", Keyword::Recursive),
    ("FROM", Keyword::From),
    ("JOIN", Keyword::Join),
    ("STRAIGHT_JOIN", Keyword::StraightJoin),
    ("LEFT", Keyword::Left),
    ("RIGHT", Keyword::Right),
    ("INNER", Keyword::Inner),
    ("OUTER", Keyword::Outer),
    ("CROSS", Keyword::Cross),
    ("NATURAL", Keyword::Natural),
    ("FULL", Keyword::Full),
    ("AS", Keyword::As),
    ("DUAL", Keyword::Dual),
    ("WHERE", Keyword::Where),
    ("ON", Keyword::On),
    ("USING", Keyword::Using),
    ("SET", Keyword::Set),
    ("GROUP", Keyword::Group),
    ("ORDER", Keyword::Order),
    ("BY", Keyword::By),
    ("HAVING", Keyword::Having),
    ("LIMIT", Keyword::Limit),
    ("OFFSET", Keyword::Offset),
    ("UNION", Keyword::Union),
    ("EXCEPT", Keyword::Except),
    ("INTERSECT", Keyword::Intersect),
    ("WINDOW", Keyword::Window),
    ("FOR", Keyword::For),
    ("LOCK", Keyword::Lock),
    ("INTO", Keyword::Into),
    ("PROCEDURE", Keyword::Procedure),
    ("RETURNING", Keyword::Returning),
    ("VALUES", Keyword::Values),
    ("VALUE", Keyword::Value),
    ("PARTITION", Keyword::Partition),
    ("USE", Keyword::Use),
    ("FORCE", Keyword::Force),
    ("IGNORE", Keyword::Ignore),
    ("INDEX", Keyword::Index),
    ("KEY", Keyword::Key),
    ("TABLE", Keyword::Table),
    ("TEMPORARY", Keyword::Temporary),
    ("IF", Keyword::If),
    ("NOT", Keyword::Not),
    ("EXISTS", Keyword::Exists),
    ("OR", Keyword::Or),
    ("LOW_PRIORITY", Keyword::LowPriority),
    ("DELAYED", Keyword::Delayed),
    ("HIGH_PRIORITY", Keyword::HighPriority),
    ("QUICK", Keyword::Quick),
    ("ONLINE", Keyword::Online),
    ("OFFLINE", Keyword::Offline),
    ("VIEW", Keyword::View),
    ("UNIQUE", Keyword::Unique),
    ("FULLTEXT", Keyword::Fulltext),
    ("SPATIAL", Keyword::Spatial),
    ("DATABASE", Keyword::Database),
    ("SCHEMA", Keyword::Schema),
    ("TRIGGER", Keyword::Trigger),
    ("ALL", Keyword::All),
    ("DISTINCT", Keyword::Distinct),
    ("DISTINCTROW", Keyword::Distinctrow),
    ("SQL_SMALL_RESULT", Keyword::SqlSmallResult),
    ("SQL_BIG_RESULT", Keyword::SqlBigResult),
    ("SQL_BUFFER_RESULT", Keyword::SqlBufferResult),
    ("SQL_CACHE", Keyword::SqlCache),
    ("SQL_NO_CACHE", Keyword::SqlNoCache),
    ("SQL_CALC_FOUND_ROWS", Keyword::SqlCalcFoundRows),
];

/// Object kinds besides tables that `CREATE`, `ALTER` and `DROP` accept. These words are
/// not reserved, so they stay identifiers everywhere else.
static OTHER_OBJECTS: &[&str] = &[
    "USER",
    "ROLE",
    "FUNCTION",
    "EVENT",
    "SERVER",
    "TABLESPACE",
    "LOGFILE",
    "RESOURCE",
    "REFERENCE",
    "INSTANCE",
];

/// View and routine options in front of the object kind,
/// `ALGORITHM = MERGE DEFINER = CURRENT_USER SQL SECURITY INVOKER VIEW v`.
static DDL_OPTIONS: &[&str] = &[
    "ALGORITHM",
    "DEFINER",
    "SQL",
    "SECURITY",
    "INVOKER",
    "AGGREGATE",
];

fn contains(words: &[&str], word: &[u8]) -> bool {
    words
        .iter()
        .any(|name| name.as_bytes().eq_ignore_ascii_case(word))
}

/// Returns true if a DDL statement naming `word` as its object kind has no table target.
pub(crate) fn names_other_object(word: &[u8]) -> bool {
    contains(OTHER_OBJECTS, word)
}

pub(crate) fn is_ddl_option(word: &[u8]) -> bool {
    contains(DDL_OPTIONS, word)
}

impl Keyword {
    /// Case insensitive lookup of a bare word.
    pub(crate) fn parse(word: &[u8]) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(name, _)| name.as_bytes().eq_ignore_ascii_case(word))
            .map(|(_, keyword)| *keyword)
    }

    pub(crate) fn statement_type(self) -> Option<StatementType> {
        match self {
            Keyword::Select => Some(StatementType::Select),
            Keyword::Insert => Some(StatementType::Insert),
            Keyword::Update => Some(StatementType::Update),
            Keyword::Delete => Some(StatementType::Delete),
            Keyword::Replace => Some(StatementType::Replace),
            Keyword::Alter => Some(StatementType::Alter),
            Keyword::Drop => Some(StatementType::Drop),
            Keyword::Create => Some(StatementType::Create),
            Keyword::Truncate => Some(StatementType::Truncate),
            _ => None,
        }
    }

    /// Words that may precede `JOIN`.
    pub(crate) fn is_join_modifier(self) -> bool {
        matches!(
            self,
            Keyword::Left
                | Keyword::Right
                | Keyword::Inner
                | Keyword::Outer
                | Keyword::Cross
                | Keyword::Natural
                | Keyword::Full
        )
    }

    /// `SELECT [ALL | DISTINCT] [HIGH_PRIORITY] [STRAIGHT_JOIN] [SQL_...]`
    pub(crate) fn is_select_modifier(self) -> bool {
        matches!(
            self,
            Keyword::All
                | Keyword::Distinct
                | Keyword::Distinctrow
                | Keyword::HighPriority
                | Keyword::StraightJoin
                | Keyword::SqlSmallResult
                | Keyword::SqlBigResult
                | Keyword::SqlBufferResult
                | Keyword::SqlCache
                | Keyword::SqlNoCache
                | Keyword::SqlCalcFoundRows
        )
    }

    pub(crate) fn is_join(self) -> bool {
        matches!(self, Keyword::Join | Keyword::StraightJoin)
    }

    /// Clause keywords that can never name a table and close a table list.
    pub(crate) fn ends_table_list(self) -> bool {
        matches!(
            self,
            Keyword::Select
                | Keyword::Where
                | Keyword::On
                | Keyword::Using
                | Keyword::Set
                | Keyword::Group
                | Keyword::Order
                | Keyword::Having
                | Keyword::Limit
                | Keyword::Union
                | Keyword::Except
                | Keyword::Intersect
                | Keyword::Window
                | Keyword::For
                | Keyword::Lock
                | Keyword::Into
                | Keyword::Procedure
                | Keyword::Returning
                | Keyword::Values
                | Keyword::Value
                | Keyword::Partition
        ) || self.is_join_modifier()
            || self.is_join()
    }

    /// Modifiers between a DDL keyword and the object name.
    pub(crate) fn is_ddl_filler(self) -> bool {
        matches!(
            self,
            Keyword::Table
                | Keyword::Temporary
                | Keyword::If
                | Keyword::Not
                | Keyword::Exists
                | Keyword::Or
                | Keyword::Replace
                | Keyword::Online
                | Keyword::Offline
                | Keyword::Ignore
                | Keyword::View
                | Keyword::Unique
                | Keyword::Fulltext
                | Keyword::Spatial
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{is_ddl_option, names_other_object, Keyword};
    use crate::statement::StatementType;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Keyword::parse(b"fROm"), Some(Keyword::From));
        assert_eq!(Keyword::parse(b"straight_join"), Some(Keyword::StraightJoin));
        assert_eq!(Keyword::parse(b"tbl_A"), None);
        assert_eq!(Keyword::parse(b""), None);
    }

    #[test]
    fn test_statement_keywords() {
        assert_eq!(
            Keyword::parse(b"Replace").and_then(Keyword::statement_type),
            Some(StatementType::Replace)
        );
        assert_eq!(Keyword::From.statement_type(), None);
    }

    #[test]
    fn test_table_is_not_a_clause() {
        assert!(!Keyword::Table.ends_table_list());
        assert!(Keyword::Where.ends_table_list());
        assert!(Keyword::Left.ends_table_list());
    }

    #[test]
    fn test_select_modifiers() {
        assert!(Keyword::parse(b"sql_calc_found_rows").is_some_and(Keyword::is_select_modifier));
        assert!(Keyword::StraightJoin.is_select_modifier());
        assert!(Keyword::StraightJoin.is_join());
        assert!(!Keyword::From.is_select_modifier());
    }

    #[test]
    fn test_ddl_words() {
        assert!(names_other_object(b"user"));
        assert!(names_other_object(b"Function"));
        assert!(!names_other_object(b"orders"));
        assert!(is_ddl_option(b"definer"));
        assert!(!is_ddl_option(b"view"));
    }
}
