//! Global (unscoped) styles.
//!
//! A global style owns one `<style>` element prepended to the head, so its
//! rules come before every component rule in cascade order.

use std::rc::Rc;

use crate::css::{CssTemplate, ProcessOptions, Props, StyleContext, process_css};
use crate::error::Result;
use crate::hash::{generate_id, hash_string};
use crate::host::Placement;
use crate::lifecycle::{Cleanup, EffectKey};
use crate::provider::use_honey_style;
use crate::styled::RenderContext;
use crate::theme::Theme;

/// Marker attribute of global style elements.
pub const HONEY_GLOBAL_STYLE_ATTR: &str = "data-honey-global-style";

/// A global stylesheet created by [`create_global_style`].
#[derive(Debug, Clone)]
pub struct GlobalStyle {
    id: String,
    template: Rc<CssTemplate>,
}

/// Create a global style from a template; nothing is injected until it
/// renders.
pub fn create_global_style(template: impl Into<CssTemplate>) -> GlobalStyle {
    GlobalStyle {
        id: generate_id("hsg"),
        template: Rc::new(template.into()),
    }
}

impl GlobalStyle {
    /// The `id` attribute of the injected element.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Evaluate and process the template against the provider's theme and
    /// schedule the injection. The effect re-runs whenever the processed CSS
    /// changes, including through theme values the processor reads.
    /// Renders nothing itself.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        let provider = use_honey_style(ctx.provider)?;
        let theme: &Theme = &provider.theme;
        let config = provider.config;
        let host = provider.registry.host();

        let props = Props::new();
        let raw_css = self.template.evaluate(&StyleContext::new(theme, &props));
        let css = process_css(
            &raw_css,
            None,
            &ProcessOptions::new(Some(theme)).with_config(config),
        );
        let id = self.id.clone();

        ctx.scheduler.insertion_effect(
            EffectKey::new(ctx.instance, self.id.as_str(), 0),
            hash_string(&css),
            Box::new(move || {
                if host.borrow().find_style("id", &id).is_some() {
                    return None;
                }
                let element = {
                    let mut head = host.borrow_mut();
                    let element = head.create_style(
                        &[("id", id.as_str()), (HONEY_GLOBAL_STYLE_ATTR, "true")],
                        Placement::Prepend,
                    );
                    head.set_text_content(element, &css);
                    element
                };
                tracing::debug!(id = %id, "injected global style");
                let cleanup: Cleanup = Box::new(move || host.borrow_mut().remove_style(element));
                Some(cleanup)
            }),
        );
        Ok(())
    }
}
