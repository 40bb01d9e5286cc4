//! Multicast Delegate Library
//!
//! Combinable multicast callback handles ("delegates") and subscribe-only
//! views over them ("events").
//!
//! # Architecture
//!
//! - A [`Delegate`] points at an immutable, reference-counted [`NodeList`] of
//!   handlers, or at nothing when it is nil
//! - Adding and removing handlers builds a new list and swaps it in; lists
//!   already shared with other delegates or with running invocations are
//!   never touched
//! - Invocation walks a [`Snapshot`] of the list, so handlers may subscribe
//!   or unsubscribe (themselves included) while they run
//! - Handlers are matched for removal by [`CallableToken`] equality, never by
//!   the identity of their call wrappers
//!
//! Delegates are single-threaded: they are neither `Send` nor `Sync`.
//!
//! # Example Usage
//!
//! ```
//! use multicast_delegate::Delegate;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct Arithmetic {
//!     history: RefCell<Vec<String>>,
//! }
//!
//! impl Arithmetic {
//!     fn sum(&self, (x, y): &(f64, f64)) -> f64 {
//!         self.history.borrow_mut().push(format!("{} + {} = {}", x, y, x + y));
//!         x + y
//!     }
//!
//!     fn prod(&self, (x, y): &(f64, f64)) -> f64 {
//!         self.history.borrow_mut().push(format!("{} * {} = {}", x, y, x * y));
//!         x * y
//!     }
//! }
//!
//! let arithmetic = Rc::new(Arithmetic { history: RefCell::default() });
//! let sum = Delegate::bind(&arithmetic, Arithmetic::sum);
//! let prod = Delegate::bind(&arithmetic, Arithmetic::prod);
//! let mut handler = &sum + &prod;
//!
//! // Only the last handler's result is returned
//! assert_eq!(handler.invoke(&(60.0, 12.0)), 720.0);
//! assert_eq!(arithmetic.history.borrow().len(), 2);
//!
//! handler -= &sum + &prod;
//! assert!(handler.is_nil());
//! assert_eq!(handler.invoke_or(&(60.0, 12.0), -1.0), -1.0);
//! ```

// Public modules
pub mod delegate;
pub mod event;
pub mod invocable;
pub mod node_list;
pub mod snapshot;
pub mod token;
pub mod types;

// Re-export main types for convenience
pub use delegate::Delegate;
pub use event::{Event, EventHandler};
pub use invocable::Invocable;
pub use node_list::{Node, NodeList};
pub use snapshot::{EntryFlags, Snapshot};
pub use token::{CallableToken, MethodId, ReceiverId};
pub use types::{DelegateError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
