//! JavaScript side of the envelope channel.
//!
//! - **Page -> host**: the page calls `window.termview.post(type, data)`,
//!   which serializes `{type, data?}` and hands it to `window.ipc.postMessage`.
//! - **Host -> page**: the host evaluates `window.termview._receive(<envelope>)`;
//!   the page registers its handler with `window.termview.onMessage(fn)`.

/// Injected into the webview before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    if (window.termview) { return; }
    var pending = [];
    var handler = null;
    window.termview = {
        post: function(type, data) {
            var envelope = { type: type };
            if (data !== undefined && data !== null) { envelope.data = data; }
            window.ipc.postMessage(JSON.stringify(envelope));
        },
        onMessage: function(callback) {
            handler = callback;
            var queued = pending;
            pending = [];
            for (var i = 0; i < queued.length; i++) { handler(queued[i]); }
        },
        _receive: function(envelope) {
            if (handler) { handler(envelope); } else { pending.push(envelope); }
        }
    };
})();
"#;

/// Build the script that delivers a serialized envelope to the page.
///
/// `json` must already be valid JSON. U+2028 and U+2029 are escaped so
/// the literal stays valid in engines that predate JSON superset support.
pub fn js_deliver_envelope(json: &str) -> String {
    let literal = json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029");
    format!("window.termview._receive({literal});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_script_defines_bridge_object() {
        assert!(IPC_INIT_SCRIPT.contains("window.termview"));
        assert!(IPC_INIT_SCRIPT.contains("window.ipc.postMessage"));
        assert!(IPC_INIT_SCRIPT.contains("_receive"));
    }

    #[test]
    fn deliver_wraps_envelope_in_receive_call() {
        let js = js_deliver_envelope(r#"{"type":"output","data":"hi"}"#);
        assert_eq!(js, r#"window.termview._receive({"type":"output","data":"hi"});"#);
    }

    #[test]
    fn deliver_escapes_line_separators() {
        let json = serde_json::to_string(&serde_json::json!({
            "type": "output",
            "data": "a\u{2028}b\u{2029}c",
        }))
        .unwrap();
        let js = js_deliver_envelope(&json);
        assert!(!js.contains('\u{2028}'));
        assert!(!js.contains('\u{2029}'));
        assert!(js.contains("a\\u2028b\\u2029c"));
    }
}
