use std::time::Duration;

/// Interval between polls of the surface, session events, and PTY.
pub const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Line written to the terminal when the shell exits.
pub fn exit_banner(code: Option<u32>) -> String {
    match code {
        Some(code) => format!("\r\n[process exited with code {code}]\r\n"),
        None => "\r\n[process exited]\r\n".to_string(),
    }
}
