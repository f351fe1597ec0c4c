// src/api/query.rs
//! OData query options for OneNote collection requests.
//!
//! Graph accepts a small set of `$`-parameters on OneNote collections.
//! This builder renders them as query pairs so they can travel through
//! the same channel as the pairs recovered from a continuation link.

/// Builder for the OData query parameters Graph accepts.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    select: Vec<String>,
    expand: Vec<String>,
    filter: Option<String>,
    order_by: Option<String>,
    top: Option<u32>,
    count: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned fields (`$select`). Repeatable.
    pub fn select(mut self, field: impl Into<String>) -> Self {
        self.select.push(field.into());
        self
    }

    /// Ask Graph to populate a parent reference (`$expand`). Repeatable.
    pub fn expand(mut self, relation: impl Into<String>) -> Self {
        self.expand.push(relation.into());
        self
    }

    /// Filter the collection (`$filter`). Literals inside the expression
    /// must already be quoted; see [`odata_quote`].
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    /// Sort the collection (`$orderby`).
    pub fn order_by(mut self, expression: impl Into<String>) -> Self {
        self.order_by = Some(expression.into());
        self
    }

    /// Cap the number of items per response (`$top`).
    pub fn top(mut self, n: u32) -> Self {
        self.top = Some(n);
        self
    }

    /// Ask for the total collection size (`$count=true`).
    pub fn with_count(mut self) -> Self {
        self.count = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_empty()
            && self.expand.is_empty()
            && self.filter.is_none()
            && self.order_by.is_none()
            && self.top.is_none()
            && !self.count
    }

    /// Renders the options as query pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.count {
            pairs.push(("$count".to_string(), "true".to_string()));
        }
        if let Some(top) = self.top {
            pairs.push(("$top".to_string(), top.to_string()));
        }
        if !self.select.is_empty() {
            pairs.push(("$select".to_string(), self.select.join(",")));
        }
        if !self.expand.is_empty() {
            pairs.push(("$expand".to_string(), self.expand.join(",")));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("$filter".to_string(), filter.clone()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("$orderby".to_string(), order_by.clone()));
        }
        pairs
    }
}

/// Escapes a literal for use inside single quotes in an OData expression.
/// OData doubles embedded quotes instead of backslash-escaping them.
pub fn odata_quote(literal: &str) -> String {
    literal.replace('\'', "''")
}

/// `$filter` expression matching pages whose parent notebook has the
/// given display name.
pub fn filter_notebook_name(display_name: &str) -> String {
    format!(
        "parentNotebook/displayName eq '{}'",
        odata_quote(display_name)
    )
}
