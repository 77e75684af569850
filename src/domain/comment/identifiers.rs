use uuid::Uuid;

/// Parses a required identifier coming from a path segment, query string or body.
///
/// `field` is the name reported back to the caller, e.g. `postId`.
pub fn parse_id(field: &str, raw: Option<&str>) -> Result<Uuid, String> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("{field} is required"))?;

    Uuid::parse_str(raw).map_err(|_| format!("Invalid {field}: must be a valid UUID"))
}
