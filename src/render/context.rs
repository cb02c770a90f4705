//! Caller-supplied document context
//!
//! The only document state a renderer sees: how a control's submission
//! name becomes an element id.

use std::fmt;
use std::sync::Arc;

type IdFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
enum IdScheme {
    Identity,
    Prefix(String),
    Custom(IdFn),
}

/// Element id mapping for one render
#[derive(Clone)]
pub struct RenderContext {
    ids: IdScheme,
}

impl RenderContext {
    /// Ids equal submission names
    pub fn new() -> Self {
        Self {
            ids: IdScheme::Identity,
        }
    }

    /// Ids are the submission name after `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            ids: IdScheme::Prefix(prefix.into()),
        }
    }

    /// Ids come from `f`
    pub fn with_id_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            ids: IdScheme::Custom(Arc::new(f)),
        }
    }

    pub fn id_for(&self, name: &str) -> String {
        match &self.ids {
            IdScheme::Identity => name.to_string(),
            IdScheme::Prefix(prefix) => format!("{}{}", prefix, name),
            IdScheme::Custom(f) => f(name),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = match &self.ids {
            IdScheme::Identity => "identity".to_string(),
            IdScheme::Prefix(prefix) => format!("prefix({})", prefix),
            IdScheme::Custom(_) => "custom".to_string(),
        };
        f.debug_struct("RenderContext").field("ids", &scheme).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_schemes() {
        assert_eq!(RenderContext::new().id_for("user.name"), "user.name");
        assert_eq!(
            RenderContext::with_prefix("signup-").id_for("user.name"),
            "signup-user.name"
        );
        let ctx = RenderContext::with_id_fn(|name| name.replace('.', "__"));
        assert_eq!(ctx.id_for("user.name"), "user__name");
    }
}
