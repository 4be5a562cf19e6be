//! Shell spawn: build a sanitized command and open a PTY for it.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use termview_common::{Result, TermSize, TermviewError};
use termview_config::schema::ShellConfig;

use super::types::{PtyHandle, PTY_READ_CHUNK};

// =============================================================================
// SHELL DETECTION
// =============================================================================

/// The user's default shell: `$SHELL` (or `/bin/sh`) on Unix,
/// `$COMSPEC` (or `cmd.exe`) on Windows.
pub fn default_shell() -> String {
    #[cfg(unix)]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }
}

// =============================================================================
// ENVIRONMENT SANITIZATION
// =============================================================================

/// Inherited environment variables. Everything else is dropped so host
/// secrets do not leak into the shell.
const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "LOGNAME",
    "SHELL",
    "PATH",
    "LANG",
    "LC_ALL",
    "LC_CTYPE",
    "DISPLAY",
    "WAYLAND_DISPLAY",
    "XDG_RUNTIME_DIR",
    "TMPDIR",
    "TMP",
    "TEMP",
    // Windows
    "USERPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "SYSTEMROOT",
    "COMSPEC",
    "HOMEDRIVE",
    "HOMEPATH",
];

// =============================================================================
// LAUNCH DESCRIPTION
// =============================================================================

/// What to run inside the PTY.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLaunch {
    pub program: String,
    pub args: Vec<String>,
    pub login_shell: bool,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    /// One-off command run through the shell instead of an interactive session.
    pub execute: Option<String>,
}

impl ShellLaunch {
    /// Resolve the shell settings plus CLI overrides.
    ///
    /// An explicit `directory` wins over `shell.cwd`.
    pub fn from_config(
        shell: &ShellConfig,
        execute: Option<String>,
        directory: Option<PathBuf>,
    ) -> Self {
        let program = shell
            .program()
            .map(str::to_string)
            .unwrap_or_else(default_shell);
        Self {
            program,
            args: shell.args.clone(),
            login_shell: shell.login,
            env: shell.env.clone(),
            cwd: directory.or_else(|| shell.cwd.clone()),
            execute,
        }
    }

    /// Argument list passed after the program name.
    pub fn argv(&self) -> Vec<String> {
        if let Some(command) = &self.execute {
            let flag = if cfg!(windows) { "/C" } else { "-c" };
            return vec![flag.to_string(), command.clone()];
        }
        let mut argv = Vec::new();
        if cfg!(unix) && self.login_shell {
            argv.push("-l".to_string());
        }
        argv.extend(self.args.iter().cloned());
        argv
    }
}

/// Build a sanitized `CommandBuilder` for `launch`.
pub fn build_shell_command(launch: &ShellLaunch) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(&launch.program);
    for arg in launch.argv() {
        cmd.arg(arg);
    }

    cmd.env_clear();
    for key in ALLOWED_ENV_VARS {
        if let Ok(val) = std::env::var(key) {
            cmd.env(key, val);
        }
    }
    cmd.env("TERM", "xterm-256color");
    cmd.env("COLORTERM", "truecolor");
    for (key, val) in &launch.env {
        cmd.env(key, val);
    }

    if let Some(dir) = &launch.cwd {
        cmd.cwd(dir);
    }
    cmd
}

// =============================================================================
// SPAWN
// =============================================================================

/// Open a PTY of `size` and start `launch` in it.
pub fn spawn_pty(launch: &ShellLaunch, size: TermSize) -> Result<PtyHandle> {
    let pty_system = native_pty_system();

    let pair = pty_system
        .openpty(pty_size(size))
        .map_err(|e| TermviewError::Terminal(format!("Failed to open PTY: {e}")))?;

    let child = pair
        .slave
        .spawn_command(build_shell_command(launch))
        .map_err(|e| {
            TermviewError::Terminal(format!("Failed to spawn shell '{}': {e}", launch.program))
        })?;
    drop(pair.slave);

    let writer = pair
        .master
        .take_writer()
        .map_err(|e| TermviewError::Terminal(format!("Failed to take PTY writer: {e}")))?;
    let mut reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| TermviewError::Terminal(format!("Failed to clone PTY reader: {e}")))?;

    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    thread::Builder::new()
        .name("pty-reader".to_string())
        .spawn(move || {
            let mut buf = [0u8; PTY_READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!("PTY reader error: {e}");
                        break;
                    }
                }
            }
        })?;

    tracing::info!(
        program = %launch.program,
        cols = size.cols,
        rows = size.rows,
        "shell spawned"
    );

    Ok(PtyHandle {
        writer,
        output_rx: rx,
        overflow: Vec::new(),
        child,
        master: pair.master,
        size,
        finished: false,
    })
}

pub(super) fn pty_size(size: TermSize) -> PtySize {
    PtySize {
        rows: size.rows,
        cols: size.cols,
        pixel_width: 0,
        pixel_height: 0,
    }
}

// =============================================================================
// TESTS
// =============================================================================
