//! The delegate handle
//!
//! A [`Delegate`] owns an optional [`NodeList`] and swaps it for a new one on
//! every structural change. All operations take `&self`, so a handler can
//! subscribe or unsubscribe on the delegate that is currently invoking it.

use crate::event::Event;
use crate::invocable::{BoundMethod, Closure, FreeFn, Invocable};
use crate::node_list::{Node, NodeList};
use crate::snapshot::{EntryFlags, Snapshot};
use crate::token::{CallableToken, MethodId, ReceiverId};
use crate::types::{DelegateError, Result};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::rc::{Rc, Weak};

/// A combinable, invocable multicast handle
///
/// `A` is the argument type handed to every handler by reference, `R` the
/// return type. Only the result of the last handler is returned; earlier
/// results are discarded.
///
/// Cloning a delegate is O(1): both handles share the same immutable list
/// until one of them changes.
///
/// # Example
/// ```
/// use multicast_delegate::Delegate;
///
/// fn sum(args: &(f64, f64)) -> f64 {
///     args.0 + args.1
/// }
///
/// fn diff(args: &(f64, f64)) -> f64 {
///     args.0 - args.1
/// }
///
/// let handler = &Delegate::from_fn(sum as fn(&(f64, f64)) -> f64)
///     + &Delegate::from_fn(diff as fn(&(f64, f64)) -> f64);
/// assert_eq!(handler.invoke(&(60.0, 12.0)), 48.0);
///
/// handler.remove(&Delegate::from_fn(diff as fn(&(f64, f64)) -> f64));
/// assert_eq!(handler.invoke(&(60.0, 12.0)), 72.0);
/// ```
pub struct Delegate<A: ?Sized, R = ()> {
    current: RefCell<Option<NodeList<A, R>>>,
}

impl<A: ?Sized, R> Delegate<A, R> {
    /// Create an empty (nil) delegate
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }

    fn with_node(node: Node<A, R>) -> Self {
        Self {
            current: RefCell::new(Some(NodeList::single(node))),
        }
    }

    /// Create a single-handler delegate from a token and its call target
    ///
    /// # Errors
    /// [`DelegateError::InvalidArgument`] if the token's method identity is
    /// [`MethodId::EMPTY`].
    pub fn from_parts(token: CallableToken, target: Rc<dyn Invocable<A, R>>) -> Result<Self> {
        if token.method().is_empty() {
            return Err(DelegateError::invalid_argument("\"method\" can not be empty"));
        }
        Ok(Self::with_node(Node::new(token, target)))
    }

    pub(crate) fn current(&self) -> Option<NodeList<A, R>> {
        self.current.borrow().clone()
    }

    fn set_current(&self, next: Option<NodeList<A, R>>) {
        let mut current = self.current.borrow_mut();
        let unchanged = match (current.as_ref(), next.as_ref()) {
            (Some(old), Some(new)) => old.ptr_eq(new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        let previous = std::mem::replace(&mut *current, next);
        // Handlers captured by the old list may touch this delegate when dropped
        drop(current);
        drop(previous);
    }

    /// Append every handler of `other`, keeping duplicates
    pub fn add(&self, other: &Delegate<A, R>) {
        let Some(addition) = other.current() else {
            return;
        };
        let next = match self.current() {
            Some(list) => list.append(&addition),
            None => addition,
        };
        log::trace!("delegate add: {} handler(s) now registered", next.len());
        self.set_current(Some(next));
    }

    /// Remove one occurrence of each handler of `other`
    ///
    /// Handlers that are not registered are ignored.
    pub fn remove(&self, other: &Delegate<A, R>) {
        let (Some(list), Some(removal)) = (self.current(), other.current()) else {
            return;
        };
        let next = list.subtract(&removal);
        log::trace!(
            "delegate remove: {} -> {} handler(s)",
            list.len(),
            next.as_ref().map_or(0, NodeList::len)
        );
        self.set_current(next);
    }

    /// Replace this delegate's handlers with those of `other` (shared, not copied)
    pub fn assign(&self, other: &Delegate<A, R>) {
        self.set_current(other.current());
    }

    /// True if no handler is registered
    pub fn is_nil(&self) -> bool {
        self.current.borrow().is_none()
    }

    /// Number of registered handlers, counting duplicates
    pub fn len(&self) -> usize {
        self.current.borrow().as_ref().map_or(0, NodeList::len)
    }

    pub fn is_empty(&self) -> bool {
        self.is_nil()
    }

    /// True if a handler with this token is registered
    pub fn contains(&self, token: &CallableToken) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|list| list.contains(token))
    }

    /// Pin the current handler list
    pub fn snapshot(&self) -> Snapshot<A, R> {
        Snapshot::acquire(self)
    }

    /// A subscribe/unsubscribe-only view of this delegate
    pub fn event(&self) -> Event<'_, A, R> {
        Event::new(self)
    }

    /// Call every handler in registration order
    ///
    /// Returns the last handler's result, or `default` when the delegate is nil
    /// or the last handler's receiver has been dropped. Changes made to this
    /// delegate by the handlers apply from the next invocation on.
    pub fn invoke_or(&self, args: &A, default: R) -> R {
        let snapshot = Snapshot::acquire(self);
        log::trace!("invoking delegate with {} handler(s)", snapshot.len());

        for (node, flags) in snapshot.entries() {
            let result = node.invoke(args);
            if result.is_none() {
                log::debug!("skipping handler {:?}: receiver was dropped", node.token());
            }
            if flags.contains(EntryFlags::LAST) {
                return result.unwrap_or(default);
            }
        }
        default
    }

    /// Call every handler in registration order, `R::default()` if nil
    pub fn invoke(&self, args: &A) -> R
    where
        R: Default,
    {
        self.invoke_or(args, R::default())
    }
}

impl<A: ?Sized + 'static, R: 'static> Delegate<A, R> {
    /// Create a delegate calling a free function
    pub fn from_fn(function: fn(&A) -> R) -> Self {
        let token = CallableToken::free(MethodId::of_fn(function));
        Self::with_node(Node::new(token, Rc::new(FreeFn::new(function))))
    }

    /// Create a delegate calling `method` on `receiver`
    ///
    /// The receiver is held weakly; once it is dropped the handler is skipped.
    pub fn bind<T: 'static>(receiver: &Rc<T>, method: fn(&T, &A) -> R) -> Self {
        Self::bind_unchecked(Rc::downgrade(receiver), method)
    }

    /// Create a delegate calling `method` on the object behind `receiver`
    ///
    /// # Errors
    /// [`DelegateError::InvalidArgument`] if the receiver is no longer alive.
    pub fn bind_weak<T: 'static>(receiver: &Weak<T>, method: fn(&T, &A) -> R) -> Result<Self> {
        if receiver.strong_count() == 0 {
            return Err(DelegateError::invalid_argument("\"receiver\" can not be null"));
        }
        Ok(Self::bind_unchecked(receiver.clone(), method))
    }

    fn bind_unchecked<T: 'static>(receiver: Weak<T>, method: fn(&T, &A) -> R) -> Self {
        let token = CallableToken::bound(ReceiverId::of_weak(&receiver), MethodId::of_method(method));
        Self::with_node(Node::new(token, Rc::new(BoundMethod::new(receiver, method))))
    }

    /// Create a delegate calling a closure, identified by `key` for removal
    ///
    /// # Errors
    /// [`DelegateError::InvalidArgument`] if `key` is [`MethodId::EMPTY`].
    pub fn from_closure<F>(key: MethodId, function: F) -> Result<Self>
    where
        F: Fn(&A) -> R + 'static,
    {
        Self::from_parts(CallableToken::free(key), Rc::new(Closure::new(function)))
    }
}

impl<A: ?Sized, R> Default for Delegate<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, R> Clone for Delegate<A, R> {
    fn clone(&self) -> Self {
        Self {
            current: RefCell::new(self.current()),
        }
    }
}

impl<A: ?Sized, R> fmt::Debug for Delegate<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("handlers", &self.current.borrow())
            .finish()
    }
}

impl<A: ?Sized, R> AddAssign<&Delegate<A, R>> for Delegate<A, R> {
    fn add_assign(&mut self, rhs: &Delegate<A, R>) {
        Delegate::add(self, rhs);
    }
}

impl<A: ?Sized, R> AddAssign for Delegate<A, R> {
    fn add_assign(&mut self, rhs: Delegate<A, R>) {
        Delegate::add(self, &rhs);
    }
}

impl<A: ?Sized, R> SubAssign<&Delegate<A, R>> for Delegate<A, R> {
    fn sub_assign(&mut self, rhs: &Delegate<A, R>) {
        Delegate::remove(self, rhs);
    }
}

impl<A: ?Sized, R> SubAssign for Delegate<A, R> {
    fn sub_assign(&mut self, rhs: Delegate<A, R>) {
        Delegate::remove(self, &rhs);
    }
}

impl<A: ?Sized, R> Add<&Delegate<A, R>> for &Delegate<A, R> {
    type Output = Delegate<A, R>;

    fn add(self, rhs: &Delegate<A, R>) -> Delegate<A, R> {
        let result = self.clone();
        Delegate::add(&result, rhs);
        result
    }
}

impl<A: ?Sized, R> Sub<&Delegate<A, R>> for &Delegate<A, R> {
    type Output = Delegate<A, R>;

    fn sub(self, rhs: &Delegate<A, R>) -> Delegate<A, R> {
        let result = self.clone();
        Delegate::remove(&result, rhs);
        result
    }
}
