//! Error panel shown when the terminal surface fails to initialize.

/// Escape text for inclusion in HTML element content or attributes.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A self-contained page describing an initialization failure.
pub fn error_page_html(description: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>termview: error</title>
  <style>
    html, body {{ margin: 0; height: 100%; background: #1e1e1e; color: #d4d4d4;
      font-family: -apple-system, "Segoe UI", sans-serif; }}
    .panel {{ max-width: 640px; margin: 15vh auto; padding: 24px;
      border: 1px solid #f14c4c; border-radius: 6px; }}
    h1 {{ margin-top: 0; font-size: 18px; color: #f14c4c; }}
    pre {{ white-space: pre-wrap; word-break: break-word; }}
  </style>
</head>
<body>
  <div class="panel">
    <h1>The terminal could not be started</h1>
    <pre>{}</pre>
  </div>
</body>
</html>
"#,
        html_escape(description)
    )
}
