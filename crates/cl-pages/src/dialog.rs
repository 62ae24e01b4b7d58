//! Request-scoped [`Dialog`] that collects alerts as flash messages.

use std::cell::RefCell;

use cl_core::Dialog;

/// Answers every confirmation with a fixed choice and remembers what the
/// controller wanted to tell the user.
///
/// The web binary builds one per request with `confirming()`: by the time a
/// form is posted the browser has already asked the user.
#[derive(Debug, Default)]
pub struct FlashDialog {
    answer: bool,
    prompts: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
    redirects: RefCell<Vec<String>>,
}

impl FlashDialog {
    pub fn confirming() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    pub fn declining() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    /// First navigation requested, if any.
    pub fn redirect_target(&self) -> Option<String> {
        self.redirects.borrow().first().cloned()
    }
}

impl Dialog for FlashDialog {
    fn alert(&self, message: &str) {
        tracing::debug!(%message, "alert");
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.answer
    }

    fn redirect(&self, location: &str) {
        self.redirects.borrow_mut().push(location.to_string());
    }
}
