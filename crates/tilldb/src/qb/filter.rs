//! WHERE-clause predicates.
//!
//! Predicates accumulate in call order and are combined with `AND` only; the
//! `$n` placeholder indices are computed at build time from the shared
//! parameter list, never via string rewriting. Building against a list that
//! already holds an UPDATE's SET parameters therefore continues the numbering
//! from where SET left off.

use crate::qb::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// One filter condition contributing to a WHERE clause.
#[derive(Clone, Debug)]
pub enum Filter {
    /// Simple comparison: `column op $n`
    Compare {
        column: String,
        op: &'static str,
        value: Param,
    },

    /// Set membership: `column IN ($n, $n+1, ...)`, one placeholder per value
    InList { column: String, values: Vec<Param> },

    /// Always-false clause, produced by an empty IN list.
    ///
    /// Keeps the SQL well-formed (`IN ()` is a syntax error) while matching
    /// zero rows, which is what set membership in the empty set means.
    Never,
}

impl Filter {
    /// Append this filter's SQL to `params` and return the fragment.
    fn build(&self, params: &mut ParamList) -> String {
        match self {
            Filter::Compare { column, op, value } => {
                let idx = params.append(value.clone());
                format!("{} {} ${}", column, op, idx)
            }
            Filter::InList { column, values } => {
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| {
                        let idx = params.append(v.clone());
                        format!("${}", idx)
                    })
                    .collect();
                format!("{} IN ({})", column, placeholders.join(", "))
            }
            Filter::Never => "1=0".to_string(),
        }
    }
}

/// The accumulated WHERE predicates of one builder.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Create a new empty filter set.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Check if no predicates have been added.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn compare<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, op: &'static str, value: T) {
        self.filters.push(Filter::Compare {
            column: column.to_string(),
            op,
            value: Param::new(value),
        });
    }

    /// Add a condition: column = value
    pub fn eq<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, "=", value);
    }

    /// Add a condition: column != value
    pub fn ne<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, "!=", value);
    }

    /// Add a condition: column > value
    pub fn gt<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, ">", value);
    }

    /// Add a condition: column >= value
    pub fn gte<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, ">=", value);
    }

    /// Add a condition: column < value
    pub fn lt<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, "<", value);
    }

    /// Add a condition: column <= value
    pub fn lte<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, value: T) {
        self.compare(column, "<=", value);
    }

    /// Add a condition: column LIKE pattern (case-sensitive)
    pub fn like<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, pattern: T) {
        self.compare(column, "LIKE", pattern);
    }

    /// Add a condition: column ILIKE pattern (case-insensitive)
    pub fn ilike<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, pattern: T) {
        self.compare(column, "ILIKE", pattern);
    }

    /// Add a condition: column IN (values...)
    ///
    /// An empty `values` list becomes the always-false clause `1=0`.
    pub fn in_list<T: ToSql + Send + Sync + 'static>(&mut self, column: &str, values: Vec<T>) {
        if values.is_empty() {
            self.filters.push(Filter::Never);
            return;
        }
        self.filters.push(Filter::InList {
            column: column.to_string(),
            values: values.into_iter().map(Param::new).collect(),
        });
    }

    /// Build the WHERE clause content (without the `WHERE` keyword),
    /// appending parameters to `params` in accumulation order.
    ///
    /// Returns an empty string when no predicates were added.
    pub fn build(&self, params: &mut ParamList) -> String {
        let parts: Vec<String> = self.filters.iter().map(|f| f.build(params)).collect();
        parts.join(" AND ")
    }
}
