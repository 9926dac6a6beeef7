//! Directive handlers and the dispatcher that routes directives to them.
pub mod link;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::Directive;
use crate::error::DirectiveError;
use crate::logging::Log;

pub use link::{Linker, LinkerConfig};

/// A unit that owns one or more directive names.
#[cfg_attr(test, mockall::automock)]
pub trait Handler: Send + Sync {
    /// Human-readable handler name.
    fn name(&self) -> &'static str;

    /// Whether this handler owns `directive`.
    fn can_handle(&self, directive: &str) -> bool;

    /// Process one directive's data.
    ///
    /// Returns `Ok(false)` when the work was attempted but some of it failed;
    /// those failures have already been logged.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Unsupported`] when called with a directive
    /// the handler does not own, and [`DirectiveError::InvalidData`] when the
    /// data cannot be decoded.
    fn handle(&self, directive: &str, data: &Value) -> Result<bool, DirectiveError>;
}

/// Every handler this build knows about.
#[must_use]
pub fn all_handlers(config: LinkerConfig, log: Arc<dyn Log>) -> Vec<Box<dyn Handler>> {
    vec![Box::new(Linker::new(config, log))]
}

/// Routes directives, in order, to the handlers that accept them.
pub struct Dispatcher {
    handlers: Vec<Box<dyn Handler>>,
    log: Arc<dyn Log>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher over `handlers`.
    #[must_use]
    pub fn new(handlers: Vec<Box<dyn Handler>>, log: Arc<dyn Log>) -> Self {
        Self { handlers, log }
    }

    /// Run every directive and AND the results.
    ///
    /// A failing directive does not stop later ones.  A directive no handler
    /// accepts is logged and counts as a failure.
    ///
    /// # Errors
    ///
    /// Propagates the first [`DirectiveError`] a handler returns; directives
    /// after it are not run.
    pub fn dispatch(&self, directives: &[Directive]) -> Result<bool, DirectiveError> {
        let mut success = true;
        for directive in directives {
            let mut handled = false;
            for handler in self
                .handlers
                .iter()
                .filter(|h| h.can_handle(&directive.name))
            {
                handled = true;
                self.log.debug(&format!(
                    "{} handling directive '{}'",
                    handler.name(),
                    directive.name
                ));
                success &= handler.handle(&directive.name, &directive.data)?;
            }
            if !handled {
                self.log
                    .error(&format!("Action {} not handled", directive.name));
                success = false;
            }
        }
        Ok(success)
    }
}
