//! Request outcomes and the optional callbacks that receive them.

use std::fmt;

/// Terminal result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx status. `None` when the body could not be read.
    Success(Option<String>),
    /// Non-2xx status (`"<statusText> [<statusCode>]"`) or transport failure.
    Error(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

type SuccessFn = Box<dyn FnOnce(Option<String>) + Send>;
type ErrorFn = Box<dyn FnOnce(String) + Send>;

/// Optional success/error handlers. Exactly one fires per request; a
/// missing handler silently discards its outcome.
#[derive(Default)]
pub struct Callbacks {
    success: Option<SuccessFn>,
    error: Option<ErrorFn>,
}

impl Callbacks {
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_success(mut self, f: impl FnOnce(Option<String>) + Send + 'static) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl FnOnce(String) + Send + 'static) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    pub(crate) fn dispatch(self, outcome: &Outcome) {
        match outcome {
            Outcome::Success(body) => {
                if let Some(f) = self.success {
                    f(body.clone());
                }
            }
            Outcome::Error(message) => {
                if let Some(f) = self.error {
                    f(message.clone());
                }
            }
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
