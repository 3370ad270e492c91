use reqwest::Method;
use serde::Serialize;

/// Per-call options for the gateway
///
/// Query parameters keep their insertion order and are never merged, so a
/// key added twice is sent twice.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter; the value is sent in its `Display` form.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Whether a body, if any, goes on the wire
    pub(crate) fn sends_body(&self) -> bool {
        self.method != Method::GET && self.method != Method::HEAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_keeps_order_and_duplicates() {
        let opts = RequestOptions::get()
            .query("a", 1)
            .query("b", "x")
            .query("a", true);
        assert_eq!(
            opts.query,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x".to_string()),
                ("a".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_body_only_sent_for_non_read_methods() {
        assert!(!RequestOptions::get().body(json!({})).sends_body());
        assert!(!RequestOptions::new(Method::HEAD).sends_body());
        assert!(RequestOptions::post().sends_body());
        assert!(RequestOptions::delete().sends_body());
    }
}
