use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The process whose output is shown in the terminal surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Unset or blank means the platform shell (`$SHELL` / `%COMSPEC%`).
    pub program: Option<String>,
    pub args: Vec<String>,
    /// Start directory; the CLI `--directory` flag takes precedence.
    pub cwd: Option<PathBuf>,
    /// Added on top of the sanitized base environment.
    pub env: BTreeMap<String, String>,
    /// Pass `-l` on Unix.
    pub login: bool,
}

impl ShellConfig {
    /// The configured program, ignoring blank values.
    pub fn program(&self) -> Option<&str> {
        self.program
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            login: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_platform_login_shell() {
        let shell = ShellConfig::default();
        assert_eq!(shell.program(), None);
        assert!(shell.login);
    }

    #[test]
    fn blank_program_is_unset() {
        let shell: ShellConfig = toml::from_str("program = \"   \"\n").unwrap();
        assert_eq!(shell.program(), None);
    }

    #[test]
    fn parses_every_field() {
        let shell: ShellConfig = toml::from_str(
            r#"
program = "/usr/bin/fish"
args = ["--private"]
cwd = "/work"
login = false

[env]
PAGER = "less"
"#,
        )
        .unwrap();
        assert_eq!(shell.program(), Some("/usr/bin/fish"));
        assert_eq!(shell.args, ["--private"]);
        assert_eq!(shell.cwd, Some(PathBuf::from("/work")));
        assert_eq!(shell.env["PAGER"], "less");
        assert!(!shell.login);
    }
}
