use termview_config::schema::WebViewSettings;

/// Configuration for creating the terminal webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebViewConfig {
    pub transparent: bool,
    /// Always on in debug builds unless overridden.
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub clipboard: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self::from_settings(&WebViewSettings::default())
    }
}

impl WebViewConfig {
    pub fn from_settings(settings: &WebViewSettings) -> Self {
        Self {
            transparent: settings.transparent,
            devtools: settings.devtools,
            user_agent: settings.user_agent.clone(),
            clipboard: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_settings_copies_fields() {
        let settings = WebViewSettings {
            devtools: true,
            transparent: true,
            user_agent: None,
        };
        let config = WebViewConfig::from_settings(&settings);
        assert!(config.devtools);
        assert!(config.transparent);
        assert!(config.user_agent.is_none());
        assert!(config.clipboard);
    }

    #[test]
    fn default_user_agent_names_termview() {
        let config = WebViewConfig::default();
        assert!(config
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.starts_with("termview/")));
    }
}
