//! Wire envelopes exchanged with the embedded surface.
//!
//! Every message is a JSON object `{ "type": <tag>, "data"?: <payload> }`.
//! Inbound (surface -> host) and outbound (host -> surface) tags are
//! disjoint, so each direction gets its own sum type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use termview_common::TermSize;

/// Why an inbound envelope could not be classified.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("invalid envelope JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{kind}` envelope is missing its data payload")]
    MissingData { kind: &'static str },

    #[error("`{kind}` envelope expects {expected} data")]
    InvalidPayload {
        kind: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
}

// =============================================================================
// INBOUND
// =============================================================================

/// A message from the embedded surface to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// The surface finished bootstrapping and reports its geometry.
    Ready(TermSize),
    /// Text typed by the user.
    Input(String),
    /// Pre-encoded binary input (e.g. mouse reports).
    Binary(String),
    /// The surface changed its geometry.
    Resize(TermSize),
    /// A tag this host does not understand.
    Unknown(String),
}

impl InboundMessage {
    /// Parse a raw envelope posted by the surface.
    ///
    /// Geometry fields are lenient: a missing or non-numeric `cols` or
    /// `rows` falls back to 80 or 24 independently. Text payloads are
    /// strict: a missing or non-string `data` is an error.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let envelope: RawEnvelope = serde_json::from_str(raw)?;
        let data = envelope.data.as_ref();

        Ok(match envelope.kind.as_str() {
            "ready" => Self::Ready(size_from(data)),
            "resize" => Self::Resize(size_from(data)),
            "input" => Self::Input(text_from("input", data)?),
            "binary" => Self::Binary(text_from("binary", data)?),
            _ => Self::Unknown(envelope.kind),
        })
    }

    /// The envelope tag, for logging.
    pub fn kind(&self) -> &str {
        match self {
            Self::Ready(_) => "ready",
            Self::Input(_) => "input",
            Self::Binary(_) => "binary",
            Self::Resize(_) => "resize",
            Self::Unknown(kind) => kind,
        }
    }
}

fn size_from(data: Option<&Value>) -> TermSize {
    TermSize::new(
        dimension(data, "cols").unwrap_or(TermSize::DEFAULT_COLS),
        dimension(data, "rows").unwrap_or(TermSize::DEFAULT_ROWS),
    )
}

/// A positive whole cell count that fits in `u16`, or `None`.
/// Integral floats such as `100.0` count as whole.
fn dimension(data: Option<&Value>, field: &str) -> Option<u16> {
    let value = data?.get(field)?;
    let cells = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > f64::from(u16::MAX) {
                return None;
            }
            f as u64
        }
    };
    u16::try_from(cells).ok().filter(|v| *v > 0)
}

fn text_from(kind: &'static str, data: Option<&Value>) -> Result<String, EnvelopeError> {
    match data {
        None | Some(Value::Null) => Err(EnvelopeError::MissingData { kind }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(EnvelopeError::InvalidPayload {
            kind,
            expected: "string",
        }),
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// A message from the host to the embedded surface.
///
/// Variants without a payload serialize without a `data` key at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Text to display verbatim.
    Output(String),
    Clear,
    Focus,
    Reset,
    ScrollToBottom,
    /// Font size in pixels.
    SetFontSize(u32),
}

impl OutboundMessage {
    /// Build a message from a wire tag and optional JSON payload.
    ///
    /// Returns `None` for unknown tags or payloads of the wrong shape.
    pub fn from_parts(kind: &str, data: Option<Value>) -> Option<Self> {
        match kind {
            "output" => data?.as_str().map(|s| Self::Output(s.to_string())),
            "clear" => Some(Self::Clear),
            "focus" => Some(Self::Focus),
            "reset" => Some(Self::Reset),
            "scrollToBottom" => Some(Self::ScrollToBottom),
            "setFontSize" => data?
                .as_u64()
                .and_then(|size| u32::try_from(size).ok())
                .map(Self::SetFontSize),
            _ => None,
        }
    }

    /// The envelope tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Output(_) => "output",
            Self::Clear => "clear",
            Self::Focus => "focus",
            Self::Reset => "reset",
            Self::ScrollToBottom => "scrollToBottom",
            Self::SetFontSize(_) => "setFontSize",
        }
    }

    /// Serialize to the JSON text posted to the surface.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- Inbound --

    #[test]
    fn parses_ready_with_geometry() {
        let msg = InboundMessage::parse(r#"{"type":"ready","data":{"cols":100,"rows":30}}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::Ready(TermSize::new(100, 30)));
    }

    #[test]
    fn ready_without_data_uses_default_geometry() {
        let msg = InboundMessage::parse(r#"{"type":"ready"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Ready(TermSize::new(80, 24)));
    }

    #[test]
    fn geometry_fields_default_independently() {
        let msg = InboundMessage::parse(r#"{"type":"resize","data":{"cols":132}}"#).unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(132, 24)));

        let msg = InboundMessage::parse(r#"{"type":"resize","data":{"rows":50}}"#).unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(80, 50)));
    }

    #[test]
    fn non_numeric_geometry_falls_back() {
        let msg =
            InboundMessage::parse(r#"{"type":"resize","data":{"cols":"wide","rows":null}}"#)
                .unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(80, 24)));

        let msg = InboundMessage::parse(r#"{"type":"ready","data":"oops"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Ready(TermSize::new(80, 24)));
    }

    #[test]
    fn out_of_range_geometry_falls_back() {
        let msg =
            InboundMessage::parse(r#"{"type":"resize","data":{"cols":-5,"rows":70000}}"#).unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(80, 24)));

        let msg = InboundMessage::parse(r#"{"type":"resize","data":{"cols":0,"rows":12.5}}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(80, 24)));
    }

    #[test]
    fn integral_float_geometry_is_accepted() {
        let msg = InboundMessage::parse(r#"{"type":"ready","data":{"cols":100.0,"rows":30.0}}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::Ready(TermSize::new(100, 30)));

        let msg = InboundMessage::parse(r#"{"type":"resize","data":{"cols":1e6,"rows":-2.0}}"#)
            .unwrap();
        assert_eq!(msg, InboundMessage::Resize(TermSize::new(80, 24)));
    }

    #[test]
    fn parses_input_and_binary() {
        let msg = InboundMessage::parse(r#"{"type":"input","data":"ls\r"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Input("ls\r".into()));

        let msg = InboundMessage::parse(r#"{"type":"binary","data":"\u001b[M !!"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Binary("\u{1b}[M !!".into()));
    }

    #[test]
    fn empty_input_still_parses() {
        let msg = InboundMessage::parse(r#"{"type":"input","data":""}"#).unwrap();
        assert_eq!(msg, InboundMessage::Input(String::new()));
    }

    #[test]
    fn input_without_data_is_rejected() {
        let err = InboundMessage::parse(r#"{"type":"input"}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingData { kind: "input" }));

        let err = InboundMessage::parse(r#"{"type":"binary","data":null}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingData { kind: "binary" }));
    }

    #[test]
    fn input_with_non_string_data_is_rejected() {
        let err = InboundMessage::parse(r#"{"type":"input","data":{"key":"a"}}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidPayload { kind: "input", .. }));
        assert_eq!(err.to_string(), "`input` envelope expects string data");
    }

    #[test]
    fn unknown_type_is_preserved() {
        let msg = InboundMessage::parse(r#"{"type":"selection","data":"abc"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Unknown("selection".into()));
        assert_eq!(msg.kind(), "selection");
    }

    #[test]
    fn garbage_and_missing_type_are_errors() {
        assert!(matches!(
            InboundMessage::parse("not json"),
            Err(EnvelopeError::Json(_))
        ));
        assert!(matches!(
            InboundMessage::parse(r#"{"data":"x"}"#),
            Err(EnvelopeError::Json(_))
        ));
        assert!(matches!(
            InboundMessage::parse(r#"{"type":7}"#),
            Err(EnvelopeError::Json(_))
        ));
    }

    // -- Outbound --

    fn wire(msg: &OutboundMessage) -> Value {
        serde_json::from_str(&msg.to_json().unwrap()).unwrap()
    }

    #[test]
    fn output_carries_string_data() {
        assert_eq!(
            wire(&OutboundMessage::Output("hello".into())),
            json!({ "type": "output", "data": "hello" })
        );
    }

    #[test]
    fn payloadless_messages_omit_data_key() {
        for (msg, tag) in [
            (OutboundMessage::Clear, "clear"),
            (OutboundMessage::Focus, "focus"),
            (OutboundMessage::Reset, "reset"),
            (OutboundMessage::ScrollToBottom, "scrollToBottom"),
        ] {
            let value = wire(&msg);
            assert_eq!(value, json!({ "type": tag }));
            assert!(value.get("data").is_none(), "{tag} must not carry data");
            assert_eq!(msg.kind(), tag);
        }
    }

    #[test]
    fn set_font_size_carries_integer() {
        assert_eq!(
            wire(&OutboundMessage::SetFontSize(16)),
            json!({ "type": "setFontSize", "data": 16 })
        );
    }

    #[test]
    fn from_parts_known_tags() {
        assert_eq!(
            OutboundMessage::from_parts("output", Some(json!("hi"))),
            Some(OutboundMessage::Output("hi".into()))
        );
        assert_eq!(
            OutboundMessage::from_parts("scrollToBottom", None),
            Some(OutboundMessage::ScrollToBottom)
        );
        assert_eq!(
            OutboundMessage::from_parts("setFontSize", Some(json!(12))),
            Some(OutboundMessage::SetFontSize(12))
        );
    }

    #[test]
    fn from_parts_rejects_unknown_or_misshapen() {
        assert_eq!(OutboundMessage::from_parts("blink", None), None);
        assert_eq!(OutboundMessage::from_parts("output", None), None);
        assert_eq!(OutboundMessage::from_parts("output", Some(json!(3))), None);
        assert_eq!(
            OutboundMessage::from_parts("setFontSize", Some(json!("big"))),
            None
        );
        assert_eq!(
            OutboundMessage::from_parts("setFontSize", Some(json!(-1))),
            None
        );
    }
}
