use uuid::Uuid;

/// Correlation id attached to a single outbound catalog request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates the span every outbound catalog request runs in
pub fn request_span(operation: &'static str) -> tracing::Span {
    let request_id = RequestId::new();

    tracing::info_span!(
        "catalog_request",
        operation = operation,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = RequestId::new();
        let rendered = id.to_string();
        assert_eq!(rendered.len(), 36);
        assert_eq!(Uuid::parse_str(&rendered).unwrap(), id.0);
    }
}
