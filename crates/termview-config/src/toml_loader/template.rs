//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# termview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bridge]
# Messages sent before the terminal page is ready are buffered.
# buffer_capacity = 0        # 0 = unbounded
# overflow = "drop_oldest"   # drop_oldest, drop_newest

[terminal]
# source = "termview://localhost/terminal/index.html"
# default_cols = 80          # 1-500
# default_rows = 24          # 1-500
# font_size = 14             # 8-72
# font_family = "Menlo, Consolas, 'DejaVu Sans Mono', monospace"

[shell]
# program = "/bin/zsh"      # unset = $SHELL
# args = []
# cwd = "~/src"
# login = true
# [shell.env]
# PAGER = "less"

[window]
# title = "termview"
# width = 960                # 200-10000
# height = 600               # 200-10000

[webview]
# devtools = false
# transparent = false

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
}
