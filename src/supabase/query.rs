//! Ordered construction of PostgREST query parameters.
//!
//! The original interface chained modifiers fluently on a query object; here
//! the same steps are applied as an explicit ordered list of query pairs:
//! column selection, then each filter condition, then sort directives, then
//! limit/offset.

use std::collections::BTreeMap;

use super::filter::FilterClause;

/// Builder collecting the query pairs for one table request.
#[derive(Debug, Default)]
pub struct TableQuery {
    params: Vec<(String, String)>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply column selection (`select=...`).
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// Apply each filter as a `column=op.value` pair.
    pub fn filters(mut self, clauses: &[FilterClause]) -> Self {
        for clause in clauses {
            self.params.push((clause.column.clone(), clause.render()));
        }
        self
    }

    /// Apply sort directives (`order=col.asc,col.desc`).
    ///
    /// Any direction other than `asc` (case-insensitive) sorts descending,
    /// matching the behavior of the original interface.
    pub fn order(mut self, order_by: &BTreeMap<String, String>) -> Self {
        if order_by.is_empty() {
            return self;
        }
        let directives: Vec<String> = order_by
            .iter()
            .map(|(column, direction)| {
                let direction = if direction.eq_ignore_ascii_case("asc") {
                    "asc"
                } else {
                    "desc"
                };
                format!("{}.{}", column, direction)
            })
            .collect();
        self.params.push(("order".to_string(), directives.join(",")));
        self
    }

    /// Apply a row limit. Zero is treated as absent.
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        if let Some(n) = limit.filter(|n| *n > 0) {
            self.params.push(("limit".to_string(), n.to_string()));
        }
        self
    }

    /// Apply a row offset. Zero is treated as absent.
    pub fn offset(mut self, offset: Option<u64>) -> Self {
        if let Some(n) = offset.filter(|n| *n > 0) {
            self.params.push(("offset".to_string(), n.to_string()));
        }
        self
    }

    /// Finish the build and return the accumulated query pairs.
    pub fn into_params(self) -> Vec<(String, String)> {
        self.params
    }
}
