//! Named bind parameters.
//!
//! Queries reference parameters as `@Name`. Before execution the names are
//! rewritten to PostgreSQL positional placeholders (`$1`, `$2`, ...), a name
//! used several times is bound once and shares its placeholder.

use indexmap::IndexMap;

use super::{value::Value, StoreError};

/// Parameter marker prefix used in query text
pub const PARAM_PREFIX: char = '@';

/// Ordered mapping from parameter name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style. `None` binds as SQL NULL.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Query text rewritten to positional placeholders, with values in bind order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Rewrite `@Name` markers into `$n` placeholders and collect the values to bind.
///
/// Markers inside quoted literals and identifiers, dollar-quoted bodies, `--` and
/// `/* */` comments and `@@` sequences are left untouched. A marker with no
/// matching parameter is an error, parameters that the query never references
/// are not bound.
pub fn bind_named(sql: &str, params: &Params) -> Result<BoundQuery, StoreError> {
    let mut out = String::with_capacity(sql.len());
    let mut order: Vec<&str> = Vec::new();
    let mut values = Vec::new();
    let mut rest = sql;

    while let Some(c) = rest.chars().next() {
        let verbatim = match c {
            '\'' | '"' => rest[1..].find(c).map_or(rest.len(), |end| end + 2),
            '-' if rest.starts_with("--") => rest.find('\n').unwrap_or(rest.len()),
            '/' if rest.starts_with("/*") => rest[2..].find("*/").map_or(rest.len(), |end| end + 4),
            '$' => dollar_quoted_len(rest).unwrap_or(1),
            PARAM_PREFIX if rest.starts_with("@@") => 2,
            PARAM_PREFIX if rest[1..].starts_with(is_name_start) => {
                let name_len = rest[1..]
                    .find(|n: char| !is_name_char(n))
                    .unwrap_or(rest.len() - 1);
                let name = &rest[1..=name_len];

                let (key, value) = params
                    .values
                    .get_key_value(name)
                    .ok_or_else(|| StoreError::MissingParameter(name.to_string()))?;

                let position = match order.iter().position(|bound| *bound == key.as_str()) {
                    Some(position) => position,
                    None => {
                        order.push(key.as_str());
                        values.push(value.clone());
                        order.len() - 1
                    }
                };
                out.push('$');
                out.push_str(&(position + 1).to_string());
                rest = &rest[1 + name_len..];
                continue;
            }
            _ => c.len_utf8(),
        };

        out.push_str(&rest[..verbatim]);
        rest = &rest[verbatim..];
    }

    if order.len() < params.len() {
        let unused: Vec<&str> = params
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !order.contains(name))
            .collect();
        tracing::debug!("Parameters not referenced by query: {:?}", unused);
    }

    Ok(BoundQuery { sql: out, values })
}

/// Length of a `$tag$ ... $tag$` block starting at `text`, `None` when `text`
/// does not open one (a positional `$1` for instance).
fn dollar_quoted_len(text: &str) -> Option<usize> {
    let tag_end = text[1..].find(|c: char| !is_name_char(c))? + 1;
    if !text[tag_end..].starts_with('$') {
        return None;
    }
    let tag = &text[..=tag_end];
    if tag.len() > 2 && !tag[1..].starts_with(is_name_start) {
        return None;
    }
    let body = &text[tag.len()..];
    Some(body.find(tag).map_or(text.len(), |end| 2 * tag.len() + end))
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
