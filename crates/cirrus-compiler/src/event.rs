//! Trigger parsing and dispatch.

use cirrus_config::RawEvent;
use serde_json::Value;

use crate::error::CompileError;
use crate::template::{EventTrigger, HttpsTrigger, Trigger};

/// Event tags the compiler understands.
pub const SUPPORTED_EVENT_TYPES: &[&str] = &["http", "event"];

/// A validated trigger declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSpec {
    /// `http: <url>`
    Http { url: String },
    /// `event: { eventType, resource, path? }`
    Event {
        event_type: String,
        resource: String,
        path: Option<String>,
    },
}

impl EventSpec {
    /// Validate a raw `events` entry belonging to `function`.
    pub fn from_raw(raw: &RawEvent, function: &str) -> Result<Self, CompileError> {
        let invalid = |reason: String| CompileError::InvalidEvent {
            function: function.to_string(),
            reason,
        };

        let entry = raw
            .0
            .as_object()
            .ok_or_else(|| invalid(format!("expected a mapping, found {}", raw.0)))?;

        if entry.len() > 1 {
            let tags: Vec<&str> = entry.keys().map(String::as_str).collect();
            return Err(invalid(format!(
                "expected a single event type, found {}",
                tags.join(", ")
            )));
        }
        let Some(tag) = raw.tag() else {
            return Err(CompileError::UnsupportedEventType {
                function: function.to_string(),
                event_type: String::new(),
            });
        };

        let body = &entry[tag];
        match tag {
            "http" => {
                let url = body
                    .as_str()
                    .ok_or_else(|| invalid("'http' must be a URL string".into()))?;
                Ok(EventSpec::Http {
                    url: url.to_string(),
                })
            }
            "event" => {
                let body = body
                    .as_object()
                    .ok_or_else(|| invalid("'event' must be a mapping".into()))?;
                let field = |name: &str| -> Result<String, CompileError> {
                    body.get(name)
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .ok_or_else(|| invalid(format!("'event.{}' must be a string", name)))
                };

                let event_type = field("eventType")?;
                let resource = field("resource")?;
                let path = match body.get("path") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(path)) => Some(path.clone()),
                    Some(_) => return Err(invalid("'event.path' must be a string".into())),
                };

                Ok(EventSpec::Event {
                    event_type,
                    resource,
                    path,
                })
            }
            other => Err(CompileError::UnsupportedEventType {
                function: function.to_string(),
                event_type: other.to_string(),
            }),
        }
    }

    /// The tag this trigger was declared with.
    pub fn tag(&self) -> &'static str {
        match self {
            EventSpec::Http { .. } => "http",
            EventSpec::Event { .. } => "event",
        }
    }

    /// Build the template trigger for this event.
    pub fn to_trigger(&self) -> Trigger {
        match self {
            EventSpec::Http { url } => Trigger::Https(HttpsTrigger { url: url.clone() }),
            EventSpec::Event {
                event_type,
                resource,
                path,
            } => Trigger::Event(EventTrigger {
                event_type: event_type.clone(),
                resource: resource.clone(),
                // Empty path is dropped, same as absent
                path: path.clone().filter(|p| !p.is_empty()),
            }),
        }
    }
}
