//! Runtime configuration.
//!
//! Development mode enables non-fatal diagnostics (unknown `@honey-media`
//! tokens, deprecated props). It defaults to the build profile and can be
//! overridden through the `HONEY_STYLE_ENV` environment variable.

/// Environment variable selecting the runtime environment.
pub const ENV_VAR: &str = "HONEY_STYLE_ENV";

/// Style pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    /// Emit development-only warnings.
    pub dev: bool,
    /// Log a hint when a rule could use a `@honey-*` shorthand.
    pub suggest_shorthands: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            dev: cfg!(debug_assertions),
            suggest_shorthands: false,
        }
    }
}

impl StyleConfig {
    /// Configuration for production builds: no diagnostics.
    pub fn production() -> Self {
        Self {
            dev: false,
            suggest_shorthands: false,
        }
    }

    /// Configuration for development builds.
    pub fn development() -> Self {
        Self {
            dev: true,
            suggest_shorthands: false,
        }
    }

    /// Read the configuration from `HONEY_STYLE_ENV`.
    ///
    /// Any value other than `production` enables development mode. When the
    /// variable is unset the build profile decides.
    pub fn from_env() -> Self {
        match std::env::var(ENV_VAR) {
            Ok(env) => Self::from_env_value(&env),
            Err(_) => Self::default(),
        }
    }

    fn from_env_value(env: &str) -> Self {
        if env.trim().eq_ignore_ascii_case("production") {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Enable or disable shorthand suggestions.
    pub fn with_suggestions(mut self, enabled: bool) -> Self {
        self.suggest_shorthands = enabled;
        self
    }
}
