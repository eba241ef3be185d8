use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

const fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Takes Ctrl+C / Esc out of the error path: a cancelled prompt yields `Ok(None)`.
pub fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether an error chain bottoms out in a cancelled prompt.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InquireError>().is_some_and(is_cancel)
}
