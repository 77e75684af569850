use serde::Deserialize;

/// Free text matched case-insensitively against comment content.
#[derive(Debug, Clone)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(s: Option<String>) -> Result<Self, String> {
        match s {
            Some(term) if !term.trim().is_empty() => Ok(Self(term)),
            _ => Err("search query is required".to_string()),
        }
    }

    /// `ILIKE` pattern matching the term as a literal substring.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    pub fn matches(&self, content: &str) -> bool {
        content.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `/search` takes `query`, `/keyword` takes `keyword`
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub keyword: Option<String>,
}

impl SearchQuery {
    /// `query` wins when both are given.
    pub fn into_term(self) -> Option<String> {
        self.query
            .filter(|q| !q.trim().is_empty())
            .or(self.keyword)
    }
}
