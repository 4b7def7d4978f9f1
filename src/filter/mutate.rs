use serde_json::Value;

use crate::event::path::Path;
use crate::event::Event;
use crate::filter::response::Decoded;

/// Tag appended to an event when a request fails and no fallback is set.
pub const FAILURE_TAG: &str = "_httprequestfailure";

/// Write the decoded result into the event.
///
/// On success the value lands at the target path. On failure the fallback
/// mapping is written there instead when one is configured; otherwise the
/// target is left untouched and the failure tag is appended. Never a partial
/// write.
pub fn apply(event: &mut Event, target: &Path, decoded: Decoded, fallback: Option<&Value>) {
    match decoded {
        Decoded::Value(value) => event.set(target, value),
        Decoded::Failed { .. } => match fallback {
            Some(fallback) => event.set(target, fallback.clone()),
            None => event.append_tag(FAILURE_TAG),
        },
    }
}
