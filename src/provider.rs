//! Style context shared by every styled component in a tree.

use std::rc::Rc;

use crate::config::StyleConfig;
use crate::error::{Error, Result};
use crate::registry::StyleRegistry;
use crate::theme::Theme;

/// Theme, registry and configuration for one render tree.
#[derive(Debug, Clone)]
pub struct StyleProvider {
    pub theme: Rc<Theme>,
    pub registry: StyleRegistry,
    pub config: StyleConfig,
}

impl StyleProvider {
    pub fn new(theme: Theme, registry: StyleRegistry) -> Self {
        Self {
            theme: Rc::new(theme),
            registry,
            config: StyleConfig::from_env(),
        }
    }

    pub fn with_config(mut self, config: StyleConfig) -> Self {
        self.config = config;
        self
    }
}

/// Access the provider, failing when rendering outside of one.
pub fn use_honey_style(provider: Option<&StyleProvider>) -> Result<&StyleProvider> {
    provider.ok_or(Error::MissingProvider(
        "The `use_honey_style()` hook must be used inside a StyleProvider!",
    ))
}
