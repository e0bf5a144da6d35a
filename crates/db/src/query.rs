//! Query-parameter builder for the PostgREST interface.
//!
//! Filters are horizontal query parameters (`age_limit_min=lte.5`), multi
//! column keyword matches use the `or=(...)` conjunction, and embedded
//! relations ride on the `select` list. The builder collects parameters in a
//! stable order so tests can assert the exact wire shape.

/// A single table read, expressed as PostgREST query parameters.
#[derive(Debug, Clone)]
pub struct TableQuery {
    table: &'static str,
    select: String,
    params: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl TableQuery {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            select: "*".to_string(),
            params: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Set the select list. Embedded relations use the PostgREST syntax,
    /// e.g. `*, insurance_categories(name, description)`.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// `column = value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `column <= value`.
    pub fn lte(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("lte.{}", value.to_string())));
        self
    }

    /// `column >= value`.
    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("gte.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring match across several columns:
    /// `or=(name.ilike.*term*,description.ilike.*term*)`.
    ///
    /// The term is sanitized so it cannot break out of the `or` list.
    pub fn ilike_any(mut self, columns: &[&str], term: &str) -> Self {
        let term = sanitize_term(term);
        if term.is_empty() || columns.is_empty() {
            return self;
        }
        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("{c}.ilike.*{term}*"))
            .collect();
        self.params
            .push(("or".to_string(), format!("({})", clauses.join(","))));
        self
    }

    /// `order=column.asc` / `order=column.desc`.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{column}.{direction}"));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Final query parameters, in a stable order:
    /// `select`, filters (insertion order), `order`, `limit`.
    pub fn into_params(self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select)];
        params.extend(self.params);
        if let Some(order) = self.order {
            params.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Strip characters that would break the `or=(...)` list or the pattern
/// syntax: commas, parentheses, asterisks, and percent signs.
fn sanitize_term(term: &str) -> String {
    term.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '%'))
        .collect()
}
