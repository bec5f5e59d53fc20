use anyhow::Result;
use inquire::InquireError;

mod render;
mod spinner;
mod style;

pub use render::{mask_secret, print_error, print_result};
pub use spinner::Spinner;
pub use style::Style;

const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive prompt flow, treating Ctrl+C or Escape as "leave
/// everything as it was" rather than an error.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            println!("{}", Style::hint("Cancelled, settings unchanged"));
            Ok(())
        }
        result => result,
    }
}
