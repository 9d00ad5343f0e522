use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Unwraps the value, panicking with the error's own display text on failure. The
    /// panicking container methods are thin wrappers that route their `try_` sibling's
    /// error through here.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}
