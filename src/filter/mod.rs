pub mod interpolate;
pub mod mutate;
pub mod request;
pub mod response;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::config::RestConfig;
use crate::error::{AppError, Result};
use crate::event::path::Path;
use crate::event::Event;
use crate::transport::HttpTransport;
use self::request::{BodyFormat, Method, RequestTemplate};
use self::response::{decode, Decoded};

/// Enrichment filter: per event, build a request from templates, perform it,
/// decode the response and merge the result back into the event.
pub struct RestFilter {
    request: RequestTemplate,
    target: Path,
    fallback: Option<Value>,
    transport: Arc<dyn HttpTransport>,
}

impl RestFilter {
    /// Validate the configuration and compile it into a filter.
    ///
    /// Unknown verbs or body formats and an empty target are configuration
    /// errors; nothing is deferred to request time.
    pub fn new(config: RestConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let method = Method::parse(&config.verb)?;

        if config.target.trim().is_empty() {
            return Err(AppError::Config(
                "target must be a non-empty event path".to_string(),
            ));
        }
        let target = Path::parse(&config.target);

        let body_format = match &config.body_format {
            Some(format) => BodyFormat::parse(format)?,
            None => BodyFormat::Json,
        };

        let request = RequestTemplate {
            method,
            url: config.url,
            headers: config.headers,
            query: config.query,
            body: config.body,
            body_format,
        };

        Ok(Self {
            request,
            target,
            fallback: config.fallback.map(Value::Object),
            transport,
        })
    }

    /// Run the filter over one event: build, perform, decode, mutate.
    ///
    /// One request attempt per event. Failures are absorbed into the event as
    /// a fallback value or a failure tag and never surface to the caller.
    pub async fn filter(&self, event: &mut Event) {
        let outcome = match self.request.build(event) {
            Ok(spec) => {
                debug!("Sending {} request to {}", spec.method.as_str(), spec.url);
                self.transport.perform(&spec).await
            }
            Err(e) => Err(e),
        };

        let decoded = decode(outcome);
        if let Decoded::Failed { reason } = &decoded {
            error!("Enrichment request failed: {}", reason);
        }

        mutate::apply(event, &self.target, decoded, self.fallback.as_ref());
    }
}
