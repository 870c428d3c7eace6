//! Outbound request descriptions.
//!
//! An [`ApiRequest`] describes one logical API call as data, without
//! executing it. The executor turns it into one or more HTTP attempts.

use serde_json::{Map, Value};

/// The HTTP methods the integration layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
}

impl Method {
    /// Returns the method as the conventional uppercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
        }
    }
}

/// One logical API call: method, path below the API root, and parameters.
///
/// Immutable once constructed. For GET requests the parameters are encoded
/// into the query string; for PUT and POST they are sent as a JSON body.
/// GET parameter values must be scalars (the query encoding has no notion of
/// nesting).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    params: Option<Map<String, Value>>,
}

impl ApiRequest {
    /// Creates a GET request for the given path (e.g. `/projects/7`).
    pub fn get(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            path: path.into(),
            params: None,
        }
    }

    /// Creates a PUT request for the given path.
    pub fn put(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Put,
            path: path.into(),
            params: None,
        }
    }

    /// Creates a POST request for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Post,
            path: path.into(),
            params: None,
        }
    }

    /// Attaches parameters to the request.
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Attaches a single parameter, building up the set incrementally.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.params.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_accumulates_params() {
        let request = ApiRequest::put("/projects/7/merge_requests/42/merge")
            .with_param("sha", "abc123")
            .with_param("should_remove_source_branch", true);

        assert_eq!(request.method(), Method::Put);
        let params = request.params().unwrap();
        assert_eq!(params.get("sha"), Some(&json!("abc123")));
        assert_eq!(params.get("should_remove_source_branch"), Some(&json!(true)));
    }

    #[test]
    fn with_params_replaces_wholesale() {
        let mut params = serde_json::Map::new();
        params.insert("state".to_string(), json!("opened"));

        let request = ApiRequest::get("/merge_requests").with_params(params);
        assert_eq!(request.params().unwrap().len(), 1);
    }

    #[test]
    fn method_tokens() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Post.as_str(), "POST");
    }
}
