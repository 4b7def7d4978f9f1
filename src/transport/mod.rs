use crate::error::{AppError, Result};
use crate::filter::request::{Method, RequestSpec};
use crate::filter::response::ResponseOutcome;

/// Seam to the HTTP client. One call per event; failures come back as
/// `AppError::Request` and are absorbed by the response decoder.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn perform(&self, spec: &RequestSpec) -> Result<ResponseOutcome>;
}

/// Production transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn perform(&self, spec: &RequestSpec) -> Result<ResponseOutcome> {
        let mut request = match spec.method {
            Method::Get => self.client.get(&spec.url),
            Method::Head => self.client.head(&spec.url),
            Method::Post => self.client.post(&spec.url),
            Method::Delete => self.client.delete(&spec.url),
        };

        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Request(e.to_string()))?;

        Ok(ResponseOutcome {
            status,
            headers,
            body,
        })
    }
}
