//! JSON output formatting
//!
//! Every JSON document orgeval prints is wrapped as
//! `{"data": ..., "meta": {"generatedAt": ..., "version": ...}}` so scripts
//! can tell which build produced a tree snapshot or an assignment result.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Envelope<'a, T: ?Sized> {
    data: &'a T,
    meta: Meta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    /// UTC time the document was produced, second precision
    generated_at: String,
    version: &'static str,
}

impl Meta {
    fn now() -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Format data as pretty-printed JSON inside the orgeval envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope {
        data,
        meta: Meta::now(),
    })
}
