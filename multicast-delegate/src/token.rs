//! Handler identities
//!
//! A [`CallableToken`] names one registered handler without owning or calling
//! it. Removal matches handlers purely by token equality, so two delegates
//! built separately from the same receiver and method compare equal even
//! though their invocation wrappers are distinct allocations.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Address identity of the object a method is bound to
///
/// Only the address is kept; the object itself is never reached through a
/// `ReceiverId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiverId(usize);

impl ReceiverId {
    /// Identity of the object behind a strong reference
    pub fn of<T>(receiver: &Rc<T>) -> Self {
        Self(Rc::as_ptr(receiver) as *const () as usize)
    }

    /// Identity of the object behind a weak reference
    ///
    /// Matches [`ReceiverId::of`] for the same allocation, whether or not the
    /// object is still alive.
    pub fn of_weak<T>(receiver: &Weak<T>) -> Self {
        Self(Weak::as_ptr(receiver) as *const () as usize)
    }

    /// Raw address value
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReceiverId(0x{:x})", self.0)
    }
}

/// Opaque identity of a function, method or keyed closure
///
/// Function pointers are identified by address. The compiler may merge
/// identical functions or duplicate one across codegen units, so two distinct
/// functions with identical bodies are not guaranteed to have distinct
/// identities.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(usize);

impl MethodId {
    /// The empty sentinel; never accepted inside a delegate
    pub const EMPTY: MethodId = MethodId(0);

    /// Identity of a free function
    pub fn of_fn<A: ?Sized, R>(function: fn(&A) -> R) -> Self {
        Self(function as usize)
    }

    /// Identity of a method taking its receiver as the first argument
    pub fn of_method<T, A: ?Sized, R>(method: fn(&T, &A) -> R) -> Self {
        Self(method as usize)
    }

    /// Identity derived from a stable name, for closures
    pub fn from_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        // Zero is reserved for EMPTY
        Self((hasher.finish() as usize).max(1))
    }

    /// Identity from a raw value chosen by the caller (0 is [`MethodId::EMPTY`])
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "MethodId(<empty>)")
        } else {
            write!(f, "MethodId(0x{:x})", self.0)
        }
    }
}

/// Equality key of one registered handler
///
/// Two tokens are equal iff both the receiver and the method identity are
/// equal. Free functions and closures have no receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallableToken {
    receiver: Option<ReceiverId>,
    method: MethodId,
}

impl CallableToken {
    /// Token for a handler without a receiver
    pub fn free(method: MethodId) -> Self {
        Self {
            receiver: None,
            method,
        }
    }

    /// Token for a method bound to `receiver`
    pub fn bound(receiver: ReceiverId, method: MethodId) -> Self {
        Self {
            receiver: Some(receiver),
            method,
        }
    }

    pub fn receiver(&self) -> Option<ReceiverId> {
        self.receiver
    }

    pub fn method(&self) -> MethodId {
        self.method
    }
}
