/*!
Statement classification and table reference extraction.

[Parser::parse] drives a [Scanner] over the statement once per nesting level:

- the leading keyword decides the [StatementType] and, for data modifying and DDL
  statements, where the primary target table is read from
- `FROM` and `JOIN` switch into table position, where identifiers are recorded as
  [TableReference]s until a clause keyword ends the table list
- parenthesized spans are matched with [`Scanner::matching_paren`] and searched for
  subqueries, so the references of derived tables and `IN (SELECT ...)` predicates are
  recorded in the order their parenthesis appears

Parsing never fails. Input the extractor does not understand yields fewer references,
never references that are not present in the text.
*/

use derive_builder::Builder;
use derive_getters::Getters;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{
    context::{Context, TableReference},
    error::Error,
    keyword::{is_ddl_option, names_other_object, Keyword},
    scanner::{Scanner, Token},
    statement::StatementType,
};

/// Default for [ParseOptions::max_depth].
pub const DEFAULT_MAX_DEPTH: usize = 128;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Options controlling a [Parser].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(build_fn(error = "Error"), setter(prefix = "with"))]
pub struct ParseOptions {
    /// Deepest parenthesis nesting that is searched for table references.
    /// Spans nested deeper are skipped.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    max_depth: usize,
    /// Record schema and table names in lower case
    #[builder(default)]
    #[serde(default)]
    lower_case_table_names: bool,
}

impl ParseOptions {
    /// Builder for parse options
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::default()
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            lower_case_table_names: false,
        }
    }
}

/// Classifies SQL statements and extracts the tables they reference.
///
/// A parser holds only its options, it can be shared between threads and used for any
/// number of concurrent parses as long as every parse gets its own [Context].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }
    /// Options of the parser
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses one statement and appends its statement type and table references to `context`.
    ///
    /// # Arguments
    /// * `sql` - Raw statement text, may contain a trailing `;` and comments
    /// * `context` - Output sink, should be empty or freshly [reset](Context::reset)
    #[instrument(
        name = "sql_route_parser::parse",
        level = "debug",
        skip(self, sql, context),
        fields(len = sql.len())
    )]
    pub fn parse(&self, sql: &[u8], context: &mut Context) {
        let mut extractor = Extractor {
            options: &self.options,
            context: &mut *context,
            ctes: Vec::new(),
        };
        extractor.statement(Scanner::new(sql), 0);
        debug!(
            statement_type = %context.statement_type(),
            references = context.reference_count(),
            "Parsed statement"
        );
    }
}

/// Parses `sql` into `context` with default options.
pub fn parse(sql: &[u8], context: &mut Context) {
    Parser::default().parse(sql, context)
}

/// Parses `sql` with default options and returns the filled context.
pub fn parse_sql(sql: &[u8]) -> Context {
    let mut context = Context::new();
    parse(sql, &mut context);
    context
}

/// Per parse state. Lives for exactly one call of [Parser::parse].
struct Extractor<'p> {
    options: &'p ParseOptions,
    context: &'p mut Context,
    /// Names bound by `WITH`, references to them are not tables
    ctes: Vec<String>,
}

impl Extractor<'_> {
    /// Full extraction over one statement or subquery.
    fn statement(&mut self, mut scanner: Scanner<'_>, depth: usize) {
        let statement_type = self.leading_keyword(&mut scanner, depth);
        if depth == 0 {
            trace!(%statement_type, "Detected statement type");
            self.context.set_statement_type(statement_type);
        }
        match statement_type {
            StatementType::Insert | StatementType::Replace => self.insert_target(&mut scanner),
            StatementType::Update => self.update_targets(&mut scanner, depth),
            StatementType::Alter
            | StatementType::Drop
            | StatementType::Create
            | StatementType::Truncate => self.ddl_targets(&mut scanner, statement_type),
            StatementType::Select => skip_select_modifiers(&mut scanner),
            StatementType::Delete | StatementType::Unknown => {}
        }
        self.body(&mut scanner, depth);
    }

    /// Consumes the statement keyword and any preceding `WITH` clause.
    fn leading_keyword(&mut self, scanner: &mut Scanner<'_>, depth: usize) -> StatementType {
        loop {
            let token = scanner.peek_token();
            match keyword(token) {
                Some(Keyword::With) => {
                    scanner.next_token();
                    self.common_table_expressions(scanner, depth);
                }
                Some(keyword) => {
                    let Some(statement_type) = keyword.statement_type() else {
                        return StatementType::Unknown;
                    };
                    scanner.next_token();
                    return statement_type;
                }
                // `(SELECT ...) UNION (SELECT ...)`, the parentheses are left to the body
                None if token == Token::Punct(b'(') && parenthesized_query(scanner) => {
                    return StatementType::Select
                }
                None => return StatementType::Unknown,
            }
        }
    }

    fn common_table_expressions(&mut self, scanner: &mut Scanner<'_>, depth: usize) {
        let recursive = keyword(scanner.peek_token()) == Some(Keyword::Recursive);
        if recursive {
            scanner.next_token();
        }
        loop {
            let name = scanner.peek_token();
            if !name.is_identifier() {
                return;
            }
            scanner.next_token();
            let name = self.name(name);
            // Without RECURSIVE the name is only bound after its own body,
            // `WITH orders AS (SELECT * FROM orders)` reads the base table.
            let pending = if recursive {
                self.ctes.push(name);
                None
            } else {
                Some(name)
            };
            // column list
            if scanner.peek_token() == Token::Punct(b'(') {
                scanner.next_token();
                scanner.enclosed();
            }
            if keyword(scanner.peek_token()) != Some(Keyword::As) {
                return;
            }
            scanner.next_token();
            if scanner.peek_token() != Token::Punct(b'(') {
                return;
            }
            scanner.next_token();
            let body = scanner.enclosed();
            self.nested(body, depth);
            self.ctes.extend(pending);
            if scanner.peek_token() != Token::Punct(b',') {
                return;
            }
            scanner.next_token();
        }
    }

    /// `INSERT [LOW_PRIORITY | DELAYED | HIGH_PRIORITY] [IGNORE] [INTO] tbl`
    fn insert_target(&mut self, scanner: &mut Scanner<'_>) {
        while matches!(
            keyword(scanner.peek_token()),
            Some(
                Keyword::LowPriority
                    | Keyword::Delayed
                    | Keyword::HighPriority
                    | Keyword::Ignore
                    | Keyword::Into
            )
        ) {
            scanner.next_token();
        }
        self.table_name(scanner);
    }

    /// `UPDATE [LOW_PRIORITY] [IGNORE] table_references SET ...`
    fn update_targets(&mut self, scanner: &mut Scanner<'_>, depth: usize) {
        while matches!(
            keyword(scanner.peek_token()),
            Some(Keyword::LowPriority | Keyword::Ignore)
        ) {
            scanner.next_token();
        }
        self.table_list(scanner, depth);
    }

    fn ddl_targets(&mut self, scanner: &mut Scanner<'_>, statement_type: StatementType) {
        // set once `TABLE` or `VIEW` was read, object kind words are names after that
        let mut named_kind = statement_type == StatementType::Truncate;
        loop {
            let token = scanner.peek_token();
            match keyword(token) {
                Some(keyword) if keyword.is_ddl_filler() => {
                    named_kind |= matches!(keyword, Keyword::Table | Keyword::View);
                    scanner.next_token();
                }
                // CREATE INDEX idx [USING BTREE] ON tbl, DROP INDEX idx ON tbl
                // CREATE TRIGGER trg BEFORE INSERT ON tbl FOR EACH ROW ...
                Some(Keyword::Index | Keyword::Trigger) => {
                    scanner.next_token();
                    self.target_after_on(scanner);
                    return;
                }
                Some(Keyword::Database | Keyword::Schema | Keyword::Procedure) => return,
                None if !named_kind && word_is(token, names_other_object) => {
                    trace!("Statement does not target a table");
                    return;
                }
                None if !named_kind && word_is(token, is_ddl_option) => {
                    skip_ddl_option(scanner);
                }
                _ => break,
            }
        }
        if statement_type == StatementType::Drop {
            while self.table_name(scanner) && scanner.peek_token() == Token::Punct(b',') {
                scanner.next_token();
            }
        } else {
            self.table_name(scanner);
        }
    }

    /// Skips the name of an index or trigger and records the table following `ON`.
    fn target_after_on(&mut self, scanner: &mut Scanner<'_>) {
        while keyword(scanner.peek_token()).is_some_and(Keyword::is_ddl_filler) {
            scanner.next_token();
        }
        qualified_name(scanner);
        loop {
            match scanner.next_token() {
                Token::Eof | Token::Punct(b';') => return,
                token if keyword(token) == Some(Keyword::On) => {
                    self.table_name(scanner);
                    return;
                }
                _ => {}
            }
        }
    }

    /// Scans the rest of a statement. `FROM` and `JOIN` start a table list, parenthesized
    /// spans are searched for subqueries.
    fn body(&mut self, scanner: &mut Scanner<'_>, depth: usize) {
        loop {
            match scanner.next_token() {
                Token::Eof => return,
                // statement end, a second statement in the buffer is not routed with this one
                Token::Punct(b';') if depth == 0 => return,
                Token::Punct(b'(') => {
                    let span = scanner.enclosed();
                    self.nested(span, depth);
                }
                token @ Token::Word(_) => match keyword(token) {
                    Some(Keyword::From) => self.table_list(scanner, depth),
                    Some(keyword) if keyword.is_join() => self.table_list(scanner, depth),
                    // `UNION SELECT STRAIGHT_JOIN ...`, the modifier is not a join
                    Some(Keyword::Select) => skip_select_modifiers(scanner),
                    // DELETE FROM a USING a JOIN b, `JOIN ... USING (id)` names columns
                    Some(Keyword::Using)
                        if self.context.statement_type() == StatementType::Delete
                            && scanner.peek_token() != Token::Punct(b'(') =>
                    {
                        self.table_list(scanner, depth)
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    /// Table position: `tbl [AS alias], (subquery) alias JOIN tbl ...`
    fn table_list(&mut self, scanner: &mut Scanner<'_>, depth: usize) {
        loop {
            let token = scanner.peek_token();
            if token == Token::Punct(b'(') {
                scanner.next_token();
                let span = scanner.enclosed();
                self.derived_table(span, depth);
                skip_alias(scanner);
                // column aliases, `(SELECT ...) AS d (a, b)`
                skip_parenthesized(scanner);
            } else if keyword(token) == Some(Keyword::Dual) {
                scanner.next_token();
                skip_alias(scanner);
            } else if self.table_name(scanner) {
                if keyword(scanner.peek_token()) == Some(Keyword::Partition) {
                    scanner.next_token();
                    skip_parenthesized(scanner);
                }
                skip_alias(scanner);
            } else {
                return;
            }
            skip_index_hints(scanner);
            if !next_table(scanner) {
                return;
            }
        }
    }

    fn derived_table(&mut self, span: &[u8], depth: usize) {
        if depth >= self.options.max_depth {
            debug!(depth, "Maximum nesting depth reached, skipping derived table");
            return;
        }
        if starts_query(span) {
            self.statement(Scanner::new(span), depth + 1);
        } else {
            // parenthesized join, `FROM (a JOIN b ON ...)`
            let mut scanner = Scanner::new(span);
            self.table_list(&mut scanner, depth + 1);
            self.body(&mut scanner, depth + 1);
        }
    }

    /// Parenthesized span outside of table position.
    fn nested(&mut self, span: &[u8], depth: usize) {
        if depth >= self.options.max_depth {
            debug!(depth, "Maximum nesting depth reached, skipping span");
            return;
        }
        if starts_query(span) {
            self.statement(Scanner::new(span), depth + 1);
        } else {
            self.expression(Scanner::new(span), depth + 1);
        }
    }

    /// Function arguments, column lists and other expressions. Only nested parentheses
    /// matter, a `FROM` in here is part of the expression (`EXTRACT(YEAR FROM d)`).
    fn expression(&mut self, mut scanner: Scanner<'_>, depth: usize) {
        loop {
            match scanner.next_token() {
                Token::Eof => return,
                Token::Punct(b'(') => {
                    let span = scanner.enclosed();
                    self.nested(span, depth);
                }
                _ => {}
            }
        }
    }

    /// Reads `[schema.]table` and records it. Returns false if no name was found.
    fn table_name(&mut self, scanner: &mut Scanner<'_>) -> bool {
        match qualified_name(scanner) {
            Some((schema, table)) => {
                self.record(schema, table);
                true
            }
            None => false,
        }
    }

    fn record(&mut self, schema: Option<Token<'_>>, table: Token<'_>) {
        let table = self.name(table);
        let schema = schema.map(|schema| self.name(schema));
        if schema.is_none() && self.ctes.iter().any(|cte| cte.eq_ignore_ascii_case(&table)) {
            trace!(%table, "Skipping reference to common table expression");
            return;
        }
        let reference = TableReference::from_parts(schema, table);
        trace!(%reference, "Recorded table reference");
        self.context.push(reference);
    }

    fn name(&self, token: Token<'_>) -> String {
        let name = match token {
            Token::Word(word) => String::from_utf8_lossy(word).into_owned(),
            Token::Quoted { delimiter, content } => unquote(delimiter, content),
            Token::Punct(_) | Token::Eof => String::new(),
        };
        if self.options.lower_case_table_names {
            name.to_lowercase()
        } else {
            name
        }
    }
}

fn keyword(token: Token<'_>) -> Option<Keyword> {
    match token {
        Token::Word(word) => Keyword::parse(word),
        _ => None,
    }
}

fn word_is(token: Token<'_>, predicate: fn(&[u8]) -> bool) -> bool {
    matches!(token, Token::Word(word) if predicate(word))
}

fn starts_query(span: &[u8]) -> bool {
    matches!(
        keyword(Scanner::new(span).next_token()),
        Some(Keyword::Select | Keyword::With)
    )
}

/// Looks through leading parentheses for `SELECT` or `WITH`.
fn parenthesized_query(scanner: &Scanner<'_>) -> bool {
    let mut lookahead = *scanner;
    loop {
        match lookahead.next_token() {
            Token::Punct(b'(') => continue,
            token => {
                return matches!(keyword(token), Some(Keyword::Select | Keyword::With));
            }
        }
    }
}

/// Reads `name`, `schema.name` or `catalog.schema.name`. Only the last two parts are kept.
fn qualified_name<'a>(scanner: &mut Scanner<'a>) -> Option<(Option<Token<'a>>, Token<'a>)> {
    let first = scanner.peek_token();
    if !first.is_identifier() || keyword(first).is_some_and(Keyword::ends_table_list) {
        return None;
    }
    scanner.next_token();
    let (mut schema, mut table) = (None, first);
    loop {
        let mut lookahead = *scanner;
        if lookahead.next_token() != Token::Punct(b'.') {
            break;
        }
        let part = lookahead.next_token();
        if !part.is_identifier() {
            break;
        }
        *scanner = lookahead;
        schema = Some(table);
        table = part;
    }
    Some((schema, table))
}

fn skip_parenthesized(scanner: &mut Scanner<'_>) {
    if scanner.peek_token() == Token::Punct(b'(') {
        scanner.next_token();
        scanner.enclosed();
    }
}

fn skip_select_modifiers(scanner: &mut Scanner<'_>) {
    while keyword(scanner.peek_token()).is_some_and(Keyword::is_select_modifier) {
        scanner.next_token();
    }
}

/// `DEFINER = 'user'@'host'`, `ALGORITHM = MERGE` or a bare option word like `SECURITY`.
fn skip_ddl_option(scanner: &mut Scanner<'_>) {
    scanner.next_token();
    if scanner.peek_token() != Token::Punct(b'=') {
        return;
    }
    scanner.next_token();
    scanner.next_token();
    while scanner.peek_token() == Token::Punct(b'@') {
        scanner.next_token();
        scanner.next_token();
    }
    // CURRENT_USER()
    skip_parenthesized(scanner);
}

/// `AS alias` or a bare alias that is not a keyword.
fn skip_alias(scanner: &mut Scanner<'_>) {
    let token = scanner.peek_token();
    match keyword(token) {
        Some(Keyword::As) => {
            scanner.next_token();
            let alias = scanner.peek_token();
            if matches!(alias, Token::Quoted { .. })
                || (alias.is_identifier() && !keyword(alias).is_some_and(Keyword::ends_table_list))
            {
                scanner.next_token();
            }
        }
        Some(_) => {}
        None if token.is_identifier() => {
            scanner.next_token();
        }
        None => {}
    }
}

/// `USE INDEX (...)`, `FORCE KEY FOR JOIN (...)`, `IGNORE INDEX FOR ORDER BY (...)`
fn skip_index_hints(scanner: &mut Scanner<'_>) {
    loop {
        let mut lookahead = *scanner;
        if !matches!(
            keyword(lookahead.next_token()),
            Some(Keyword::Use | Keyword::Force | Keyword::Ignore)
        ) {
            return;
        }
        if !matches!(
            keyword(lookahead.next_token()),
            Some(Keyword::Index | Keyword::Key)
        ) {
            return;
        }
        if keyword(lookahead.peek_token()) == Some(Keyword::For) {
            lookahead.next_token();
            if matches!(
                keyword(lookahead.next_token()),
                Some(Keyword::Order | Keyword::Group)
            ) {
                lookahead.next_token();
            }
        }
        if lookahead.peek_token() == Token::Punct(b'(') {
            lookahead.next_token();
            lookahead.enclosed();
        }
        *scanner = lookahead;
    }
}

/// Consumes a `,` or a join operator. Returns true if another table follows.
fn next_table(scanner: &mut Scanner<'_>) -> bool {
    let mut lookahead = *scanner;
    let mut token = lookahead.next_token();
    if token == Token::Punct(b',') {
        *scanner = lookahead;
        return true;
    }
    while keyword(token).is_some_and(Keyword::is_join_modifier) {
        token = lookahead.next_token();
    }
    if keyword(token).is_some_and(Keyword::is_join) {
        *scanner = lookahead;
        true
    } else {
        false
    }
}

/// Strips one level of doubled delimiters from quoted content.
fn unquote(delimiter: u8, content: &[u8]) -> String {
    let mut name = Vec::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        name.push(content[i]);
        if content[i] == delimiter && content.get(i + 1) == Some(&delimiter) {
            i += 2;
        } else {
            i += 1;
        }
    }
    String::from_utf8_lossy(&name).into_owned()
}

#[cfg(test)]
mod tests {
    use crate::{context::Context, statement::StatementType};

    use super::{parse_sql, unquote, ParseOptions, Parser};

    fn tables(sql: &str) -> Vec<String> {
        parse_sql(sql.as_bytes())
            .references()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(b'`', b"a``b"), "a`b");
        assert_eq!(unquote(b'"', b"plain"), "plain");
        assert_eq!(unquote(b'`', b"`"), "`");
    }

    #[test]
    fn test_alias_forms() {
        assert_eq!(
            tables("select * from a as x, b y, c AS `z`, d \"w\" where 1"),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_join_forms() {
        assert_eq!(
            tables(
                "select * from a natural join b left outer join c on c.id = b.id \
                 cross join d straight_join e inner join f using (id)"
            ),
            vec!["a", "b", "c", "d", "e", "f"]
        );
    }

    #[test]
    fn test_index_hints() {
        assert_eq!(
            tables("select * from a use index (i1), b force key for order by (i2) ignore index (i3), c"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_dual_is_not_a_table() {
        let context = parse_sql(b"SELECT 1 FROM DUAL");
        assert_eq!(context.statement_type(), StatementType::Select);
        assert!(context.is_empty());
    }

    #[test]
    fn test_catalog_schema_table() {
        let context = parse_sql(b"select * from cat.db.orders o");
        assert_eq!(context.schema_at(0).unwrap(), Some("db"));
        assert_eq!(context.table_at(0).unwrap(), "orders");
    }

    #[test]
    fn test_function_with_from_is_opaque() {
        assert_eq!(
            tables("select extract(year from created), trim(both 'x' from name) from orders"),
            vec!["orders"]
        );
    }

    #[test]
    fn test_parenthesized_join() {
        assert_eq!(
            tables("select * from (a join b on a.id = b.id) join c on c.id = a.id"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_common_table_expressions() {
        let context = parse_sql(
            b"WITH RECURSIVE recent (id) AS (SELECT id FROM orders), totals AS \
              (SELECT * FROM recent JOIN shop.items i ON i.id = recent.id) \
              SELECT * FROM totals, customers",
        );
        assert_eq!(context.statement_type(), StatementType::Select);
        let tables: Vec<_> = context.tables().collect();
        assert_eq!(
            tables,
            vec![(None, "orders"), (Some("shop"), "items"), (None, "customers")]
        );
    }

    #[test]
    fn test_insert_select() {
        let context = parse_sql(b"insert into archive (id) select id from orders where id in (select id from stale)");
        assert_eq!(context.statement_type(), StatementType::Insert);
        assert_eq!(
            context.references().iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["archive", "orders", "stale"]
        );
    }

    #[test]
    fn test_on_duplicate_key_update() {
        assert_eq!(
            tables("INSERT INTO t (a, b) VALUES (1, 2) ON DUPLICATE KEY UPDATE b = VALUES(b)"),
            vec!["t"]
        );
    }

    #[test]
    fn test_multi_table_update() {
        let context = parse_sql(b"UPDATE LOW_PRIORITY items i, month m SET i.price = m.price WHERE i.id = m.id");
        assert_eq!(context.statement_type(), StatementType::Update);
        assert_eq!(context.reference_count(), 2);
        assert_eq!(context.table_at(1).unwrap(), "month");
    }

    #[test]
    fn test_update_with_subquery() {
        assert_eq!(
            tables("UPDATE a JOIN b ON a.id = b.id SET a.x = (SELECT max(y) FROM c)"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_ddl_forms() {
        let cases: [(&str, StatementType, &[&str]); 15] = [
            ("CREATE UNIQUE INDEX idx ON db.t (a)", StatementType::Create, &["db.t"]),
            ("CREATE INDEX idx USING BTREE ON t (a)", StatementType::Create, &["t"]),
            ("ALTER TABLE t ADD INDEX i (a) USING HASH", StatementType::Alter, &["t"]),
            (
                "CREATE TRIGGER trg BEFORE INSERT ON orders FOR EACH ROW SET NEW.x = 1",
                StatementType::Create,
                &["orders"],
            ),
            ("DROP TRIGGER IF EXISTS shop.trg", StatementType::Drop, &[]),
            ("DROP USER bob", StatementType::Drop, &[]),
            ("CREATE FUNCTION f() RETURNS INT RETURN 1", StatementType::Create, &[]),
            ("CREATE TABLE user (id INT)", StatementType::Create, &["user"]),
            (
                "CREATE ALGORITHM = MERGE DEFINER = 'app'@'%' SQL SECURITY INVOKER VIEW v AS SELECT * FROM t",
                StatementType::Create,
                &["v", "t"],
            ),
            ("DROP INDEX idx ON t", StatementType::Drop, &["t"]),
            ("DROP TABLE IF EXISTS a, b.c;", StatementType::Drop, &["a", "b.c"]),
            ("CREATE DATABASE shop", StatementType::Create, &[]),
            ("CREATE OR REPLACE VIEW v AS SELECT * FROM t", StatementType::Create, &["v", "t"]),
            ("CREATE TEMPORARY TABLE tmp AS SELECT * FROM t", StatementType::Create, &["tmp", "t"]),
            ("TRUNCATE orders", StatementType::Truncate, &["orders"]),
        ];
        for (sql, statement_type, expected) in cases {
            let context = parse_sql(sql.as_bytes());
            assert_eq!(context.statement_type(), statement_type, "{sql}");
            let tables: Vec<_> = context.references().iter().map(ToString::to_string).collect();
            assert_eq!(tables, expected, "{sql}");
        }
    }

    #[test]
    fn test_straight_join_modifier() {
        assert_eq!(
            tables("SELECT STRAIGHT_JOIN a.id, b.name FROM a JOIN b ON a.id = b.id"),
            vec!["a", "b"]
        );
        assert_eq!(
            tables(
                "select distinct sql_calc_found_rows x.id from x \
                 union all select straight_join y.id from y straight_join z"
            ),
            vec!["x", "y", "z"]
        );
    }

    #[test]
    fn test_cte_may_read_table_of_same_name() {
        assert_eq!(
            tables("WITH orders AS (SELECT * FROM orders WHERE x = 1) SELECT * FROM orders"),
            vec!["orders"]
        );
    }

    #[test]
    fn test_partitions_and_column_aliases() {
        assert_eq!(tables("SELECT * FROM t PARTITION (p0, p1) AS x, u"), vec!["t", "u"]);
        assert_eq!(tables("SELECT * FROM (SELECT 1) AS d (a), u"), vec!["u"]);
        assert_eq!(tables("UPDATE t PARTITION (p0) SET a = 1"), vec!["t"]);
    }

    #[test]
    fn test_delete_using() {
        let context = parse_sql(b"DELETE FROM a USING a, b WHERE a.id = b.id");
        assert_eq!(context.statement_type(), StatementType::Delete);
        let names: Vec<_> = context.tables().map(|(_, table)| table).collect();
        assert_eq!(names, vec!["a", "a", "b"]);
        assert_eq!(tables("DELETE a FROM a JOIN b USING (id)"), vec!["a", "b"]);
    }

    #[test]
    fn test_semicolon_ends_statement() {
        assert_eq!(tables("SELECT * FROM a; SELECT * FROM b"), vec!["a"]);
        assert_eq!(tables("DROP TABLE a; DROP TABLE b"), vec!["a"]);
        assert_eq!(tables("SELECT * FROM a; -- trailing"), vec!["a"]);
    }

    #[test]
    fn test_parenthesized_select_is_classified() {
        let context = parse_sql(b"((SELECT a FROM t1) UNION (SELECT a FROM t2)) ORDER BY a");
        assert_eq!(context.statement_type(), StatementType::Select);
        assert_eq!(context.reference_count(), 2);
    }

    #[test]
    fn test_unknown_statement_still_scans() {
        let context = parse_sql(b"EXPLAIN SELECT * FROM t");
        assert_eq!(context.statement_type(), StatementType::Unknown);
        assert_eq!(context.table_at(0).unwrap(), "t");
    }

    #[test]
    fn test_max_depth() {
        let options = ParseOptions::builder().with_max_depth(1).build().unwrap();
        let parser = Parser::new(options);
        let mut context = Context::new();
        parser.parse(b"select * from a, (select * from b, (select * from c) x) y", &mut context);
        let tables: Vec<_> = context.tables().map(|(_, table)| table).collect();
        assert_eq!(tables, vec!["a", "b"]);
    }

    #[test]
    fn test_lower_case_table_names() {
        let options = ParseOptions::builder()
            .with_lower_case_table_names(true)
            .build()
            .unwrap();
        let mut context = Context::new();
        Parser::new(options).parse(b"SELECT * FROM Shop.`Orders`", &mut context);
        assert_eq!(context.schema_at(0).unwrap(), Some("shop"));
        assert_eq!(context.table_at(0).unwrap(), "orders");
    }

    #[test]
    fn test_options_serde() {
        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
        let options: ParseOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(*options.max_depth(), 8);
        assert!(!*options.lower_case_table_names());
    }
}
