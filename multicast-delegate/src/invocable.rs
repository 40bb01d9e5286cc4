//! Type-erased call targets
//!
//! Every node of a delegate stores its [`CallableToken`](crate::CallableToken)
//! next to an `Rc<dyn Invocable<A, R>>`. The token decides equality, the
//! invocable performs the call. Wrappers are never compared.

use std::fmt;
use std::rc::Weak;

/// The single capability a delegate needs from a handler
pub trait Invocable<A: ?Sized, R> {
    /// Call the handler
    ///
    /// Returns `None` when the handler can no longer be reached, e.g. its
    /// receiver has been dropped.
    fn invoke(&self, args: &A) -> Option<R>;
}

/// A plain function
pub struct FreeFn<A: ?Sized, R> {
    function: fn(&A) -> R,
}

impl<A: ?Sized, R> FreeFn<A, R> {
    pub fn new(function: fn(&A) -> R) -> Self {
        Self { function }
    }
}

impl<A: ?Sized, R> Invocable<A, R> for FreeFn<A, R> {
    fn invoke(&self, args: &A) -> Option<R> {
        Some((self.function)(args))
    }
}

/// A method bound to a weakly held receiver
pub struct BoundMethod<T, A: ?Sized, R> {
    receiver: Weak<T>,
    method: fn(&T, &A) -> R,
}

impl<T, A: ?Sized, R> BoundMethod<T, A, R> {
    pub fn new(receiver: Weak<T>, method: fn(&T, &A) -> R) -> Self {
        Self { receiver, method }
    }
}

impl<T, A: ?Sized, R> Invocable<A, R> for BoundMethod<T, A, R> {
    fn invoke(&self, args: &A) -> Option<R> {
        let receiver = self.receiver.upgrade()?;
        Some((self.method)(&receiver, args))
    }
}

/// An arbitrary closure
pub struct Closure<F> {
    function: F,
}

impl<F> Closure<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

impl<A: ?Sized, R, F> Invocable<A, R> for Closure<F>
where
    F: Fn(&A) -> R,
{
    fn invoke(&self, args: &A) -> Option<R> {
        Some((self.function)(args))
    }
}

impl<A: ?Sized, R> fmt::Debug for FreeFn<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeFn").finish_non_exhaustive()
    }
}

impl<T, A: ?Sized, R> fmt::Debug for BoundMethod<T, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("alive", &(self.receiver.strong_count() > 0))
            .finish_non_exhaustive()
    }
}
