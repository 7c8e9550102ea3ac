pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub api_base_url: String,
    pub deprecate_rest: bool,
}

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let api_base_url = std::env::var("USER_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let deprecate_rest = std::env::var("DEPRECATE_REST")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        Self {
            mode,
            port,
            api_base_url,
            deprecate_rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_to_server_8080_and_local_api() {
        std::env::remove_var("MODE");
        std::env::remove_var("PORT");
        std::env::remove_var("USER_API_BASE_URL");
        std::env::remove_var("DEPRECATE_REST");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "server");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.api_base_url, "http://localhost:8080");
        assert!(!cfg.deprecate_rest);
    }

    #[test]
    #[serial]
    fn parses_env_overrides() {
        std::env::set_var("MODE", "stdio");
        std::env::set_var("PORT", "9090");
        std::env::set_var("USER_API_BASE_URL", "http://users.internal:8081");
        std::env::set_var("DEPRECATE_REST", "1");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "stdio");
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.api_base_url, "http://users.internal:8081");
        assert!(cfg.deprecate_rest);
        std::env::remove_var("MODE");
        std::env::remove_var("PORT");
        std::env::remove_var("USER_API_BASE_URL");
        std::env::remove_var("DEPRECATE_REST");
    }

    #[test]
    #[serial]
    fn blank_base_url_falls_back_to_default() {
        std::env::set_var("USER_API_BASE_URL", "  ");
        let cfg = Config::from_env();
        assert_eq!(cfg.api_base_url, "http://localhost:8080");
        std::env::remove_var("USER_API_BASE_URL");
    }
}
