//! Type definitions of a low-level SQL string representation.

/// A SQL statement under construction.
///
/// Parameters are numbered in the order they are appended, so nested
/// expressions share a single `$1..$n` sequence.
#[derive(Debug, PartialEq)]
pub struct SQL {
    pub sql: String,
    pub params: Vec<Param>,
    /// for internal use and tests only
    pub param_index: u64,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

/// A parameter for a parameterized query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A 64-bit integer
    Int8(i64),
    /// A literal string
    String(String),
    /// A boolean
    Bool(bool),
    /// An arbitrary json value, bound as `jsonb`
    Value(serde_json::Value),
}

impl SQL {
    pub fn new() -> SQL {
        SQL {
            sql: String::new(),
            params: vec![],
            param_index: 0,
        }
    }
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }
    /// Append an identifier, quoting it unless it is a plain lowercase name that is not a
    /// reserved keyword.
    pub fn append_identifier(&mut self, identifier: &str) {
        if is_plain_identifier(identifier) {
            self.sql.push_str(identifier);
        } else {
            self.sql.push('"');
            self.sql.push_str(&identifier.replace('"', "\"\""));
            self.sql.push('"');
        }
    }
    pub fn append_param(&mut self, param: Param) {
        self.param_index += 1;
        self.sql.push_str(format!("${}", self.param_index).as_str());
        self.params.push(param);
    }
    /// Finish building and freeze the statement.
    pub fn into_query(self) -> Query {
        Query {
            text: self.sql,
            values: self.params,
        }
    }
}

/// Keywords PostgreSQL reserves, which cannot appear unquoted as table or column names.
/// Sorted for binary search.
const RESERVED_KEYWORDS: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation", "column",
    "concurrently", "constraint", "create", "cross", "current_catalog", "current_date",
    "current_role", "current_schema", "current_time", "current_timestamp", "current_user",
    "default", "deferrable", "desc", "distinct", "do", "else", "end", "except", "false", "fetch",
    "for", "foreign", "freeze", "from", "full", "grant", "group", "having", "ilike", "in",
    "initially", "inner", "intersect", "into", "is", "isnull", "join", "lateral", "leading",
    "left", "like", "limit", "localtime", "localtimestamp", "natural", "not", "notnull", "null",
    "offset", "on", "only", "or", "order", "outer", "overlaps", "placing", "primary",
    "references", "returning", "right", "select", "session_user", "similar", "some", "symmetric",
    "system_user", "table", "tablesample", "then", "to", "trailing", "true", "union", "unique",
    "user", "using", "variadic", "verbose", "when", "where", "window", "with",
];

fn is_plain_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let lowercase_name = match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => chars
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
        _ => false,
    };
    lowercase_name && RESERVED_KEYWORDS.binary_search(&identifier).is_err()
}


/// A finished statement: text with positional placeholders and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    values: Vec<Param>,
}

impl Query {
    /// A statement without parameters, such as `BEGIN`.
    pub fn raw(text: impl Into<String>) -> Query {
        Query {
            text: text.into(),
            values: vec![],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn values(&self) -> &[Param] {
        &self.values
    }
}
