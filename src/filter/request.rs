use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::event::Event;
use crate::filter::interpolate::{render, render_string, stringify};

/// HTTP verbs the filter is allowed to send. Anything else is rejected when
/// the filter is constructed, before any event is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Delete,
}

impl Method {
    pub fn parse(verb: &str) -> Result<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "head" => Ok(Method::Head),
            "post" => Ok(Method::Post),
            "delete" => Ok(Method::Delete),
            other => Err(AppError::Config(format!(
                "Unsupported verb '{}': expected one of get, head, post, delete",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Head => "head",
            Method::Post => "post",
            Method::Delete => "delete",
        }
    }
}

/// Serialization applied to the rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Text,
}

impl BodyFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_ascii_lowercase().as_str() {
            "json" => Ok(BodyFormat::Json),
            "text" => Ok(BodyFormat::Text),
            other => Err(AppError::Config(format!(
                "Unsupported body format '{}': expected json or text",
                other
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Text => "text/plain",
        }
    }
}

/// The request shape fixed at configuration time; per-event values are filled
/// in by `build`.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    pub method: Method,
    pub url: String,
    pub headers: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
    pub body_format: BodyFormat,
}

/// A fully resolved outbound request, built fresh for each event.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Map<String, Value>,
    pub body: Option<String>,
}

impl RequestTemplate {
    /// Render every templated part against the event and serialize the body.
    ///
    /// Header values are stringified; query values stay structured and are
    /// left to the transport to encode. When a body is present and no
    /// content-type header was configured, one is derived from the body
    /// format.
    pub fn build(&self, event: &Event) -> Result<RequestSpec> {
        let url = stringify(&render_string(&self.url, event));

        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), stringify(&render(value, event))))
            .collect();

        let query = match render(&Value::Object(self.query.clone()), event) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let body = match &self.body {
            Some(template) => {
                let rendered = render(template, event);
                let serialized = match self.body_format {
                    BodyFormat::Json => serde_json::to_string(&rendered)?,
                    BodyFormat::Text => stringify(&rendered),
                };
                Some(serialized)
            }
            None => None,
        };

        if body.is_some() {
            let has_content_type = headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                let derived = self.body_format.content_type().to_string();
                headers.push(("content-type".to_string(), derived));
            }
        }

        Ok(RequestSpec {
            method: self.method,
            url,
            headers,
            query,
            body,
        })
    }
}
