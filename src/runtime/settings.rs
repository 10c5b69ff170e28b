use crate::config;

/// Load settings, apply the `--server` override, then validate. Falls back to
/// defaults and returns a warning when the config cannot be read or is invalid.
pub fn load_settings(server: Option<&str>) -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(mut s) => {
            if let Some(url) = server {
                s.server.base_url = url.to_string();
            }
            validated(s)
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            let warning = format!("failed to load config, using defaults: {e}");
            eprintln!("cantor: {warning}");
            (config::Settings::default(), Some(warning))
        }
    }
}

fn validated(s: config::Settings) -> (config::Settings, Option<String>) {
    match s.validate() {
        Ok(()) => (s, None),
        Err(msg) => {
            let warning = format!("invalid config, using defaults: {msg}");
            eprintln!("cantor: {warning}");
            (config::Settings::default(), Some(warning))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_http_server_falls_back_to_defaults() {
        let mut s = config::Settings::default();
        s.server.base_url = "ftp://catalog".to_string();

        let (settings, warning) = validated(s);
        assert_eq!(settings.server.base_url, config::Settings::default().server.base_url);
        assert!(warning.is_some_and(|w| w.contains("base_url")));
    }

    #[test]
    fn valid_settings_pass_through() {
        let mut s = config::Settings::default();
        s.server.base_url = "https://catalog.example".to_string();

        let (settings, warning) = validated(s);
        assert_eq!(settings.server.base_url, "https://catalog.example");
        assert!(warning.is_none());
    }
}
