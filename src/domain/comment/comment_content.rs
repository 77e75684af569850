#[derive(Debug, Clone)]
pub struct CommentContent(String);

impl CommentContent {
    /// Accepts any body that is not blank. The text is stored as written.
    pub fn parse(s: Option<String>) -> Result<Self, String> {
        match s {
            Some(content) if !content.trim().is_empty() => Ok(Self(content)),
            _ => Err("content is required".to_string()),
        }
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommentContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
