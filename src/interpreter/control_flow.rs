use std::error::Error;

/// The non-`Ok` outcomes of evaluation: a `return` unwinding to the nearest
/// enclosing call, or a genuine runtime error.
pub enum ControlFlow<R, E> {
    Return(R),
    Err(E),
}

impl<R, E: Error> From<E> for ControlFlow<R, E> {
    fn from(err: E) -> Self {
        ControlFlow::Err(err)
    }
}
