//! Shared failure handling for every backend call.

use super::ApiError;
use log::error;
use std::rc::Rc;

/// Sink for user-visible error messages.
pub trait Notifier {
    fn notify_error(&self, message: &str);
}

/// Notifies the user about a failed call and hands the error back unchanged.
#[derive(Clone)]
pub struct ErrorInterceptor {
    notifier: Rc<dyn Notifier>,
}

impl ErrorInterceptor {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn intercept<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        result.inspect_err(|err| {
            error!("API call failed: {err:?}");
            self.notifier.notify_error(&err.notification_message());
        })
    }

    pub(crate) fn same_notifier(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.notifier, &other.notifier)
    }
}
