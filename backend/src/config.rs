//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PORTFOLIO_*` environment variables, or config
//! files, in OrthoConfig's usual precedence. Everything has a default so a
//! bare `portfolio-backend` starts locally.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings controlling the HTTP listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTFOLIO")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub bind_addr: Option<String>,
    /// TCP port; defaults to 8080.
    pub port: Option<u16>,
}

impl ServerSettings {
    /// Configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("portfolio-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env([
            ("PORTFOLIO_BIND_ADDR", None::<String>),
            ("PORTFOLIO_PORT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.port(), DEFAULT_PORT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PORTFOLIO_BIND_ADDR", Some("127.0.0.1".to_owned())),
            ("PORTFOLIO_PORT", Some("9090".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
    }
}
