//! Request descriptors.

use serde::Serialize;

use crate::error::Result;
use crate::path::ResolvedPath;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How the response body should be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseForm {
    /// Decode as JSON; an undecodable 2xx body is an error.
    #[default]
    Json,
    /// Keep the body as a JSON string value.
    Text,
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub form: ResponseForm,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn text() -> Self {
        Self {
            form: ResponseForm::Text,
            ..Default::default()
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A fully described request, immutable once built.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: RequestMethod,
    path: ResolvedPath,
    body: Option<serde_json::Value>,
    options: RequestOptions,
}

impl RequestDescriptor {
    pub fn new(method: RequestMethod, path: ResolvedPath) -> Self {
        Self {
            method,
            path,
            body: None,
            options: RequestOptions::default(),
        }
    }

    /// Attach a JSON body. `null` bodies are dropped.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = if value.is_null() { None } else { Some(value) };
        Ok(self)
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn path(&self) -> &ResolvedPath {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{build, Segment};

    #[test]
    fn test_descriptor_with_body() {
        let path = build(vec![Segment::from("organizations")]).unwrap();
        let req = RequestDescriptor::new(RequestMethod::Post, path)
            .with_json(&serde_json::json!({"organization": {"name": "Acme"}}))
            .unwrap();

        assert_eq!(req.method(), RequestMethod::Post);
        assert_eq!(req.path().to_string(), "organizations");
        assert_eq!(req.body().unwrap()["organization"]["name"], "Acme");
        assert_eq!(req.options().form, ResponseForm::Json);
    }

    #[test]
    fn test_null_body_is_dropped() {
        let path = build(vec![Segment::from("organizations")]).unwrap();
        let req = RequestDescriptor::new(RequestMethod::Put, path)
            .with_json(&serde_json::Value::Null)
            .unwrap();
        assert!(req.body().is_none());
    }

    #[test]
    fn test_options() {
        let options = RequestOptions::text().header("X-On-Behalf-Of", "agent@example.com");
        assert_eq!(options.form, ResponseForm::Text);
        assert_eq!(options.headers.len(), 1);
    }
}
