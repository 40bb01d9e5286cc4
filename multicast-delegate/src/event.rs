//! Subscribe-only views of delegates
//!
//! A publisher keeps its [`Delegate`] private and hands out [`Event`]s.
//! An `Event` can only add and remove handlers: it has no way to invoke,
//! inspect, or replace the delegate behind it.
//!
//! # Example
//! ```
//! use multicast_delegate::{Event, EventHandler};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Thermostat {
//!     reading: Cell<i32>,
//!     changed: EventHandler<i32>,
//! }
//!
//! impl Thermostat {
//!     fn changed(&self) -> Event<'_, i32> {
//!         self.changed.event()
//!     }
//!
//!     fn set(&self, reading: i32) {
//!         self.reading.set(reading);
//!         self.changed.invoke(&reading);
//!     }
//! }
//!
//! struct Display {
//!     shown: Cell<i32>,
//! }
//!
//! impl Display {
//!     fn show(&self, reading: &i32) {
//!         self.shown.set(*reading);
//!     }
//! }
//!
//! let thermostat = Thermostat { reading: Cell::new(0), changed: EventHandler::new() };
//! let display = Rc::new(Display { shown: Cell::new(0) });
//!
//! thermostat.changed().add(&EventHandler::bind(&display, Display::show));
//! thermostat.set(21);
//! assert_eq!(display.shown.get(), 21);
//! ```

use crate::delegate::Delegate;
use std::fmt;
use std::ops::{AddAssign, SubAssign};

/// Conventional delegate type for notifications carrying a payload `E`
///
/// Handlers receive only `&E`; no sender is passed alongside it. Publishers
/// whose subscribers need to know who raised the event put that into `E`,
/// for example as a `Weak` reference or an identifier.
pub type EventHandler<E> = Delegate<E, ()>;

/// Add/remove-only access to a delegate owned by someone else
pub struct Event<'a, A: ?Sized, R = ()> {
    delegate: &'a Delegate<A, R>,
}

impl<'a, A: ?Sized, R> Event<'a, A, R> {
    pub fn new(delegate: &'a Delegate<A, R>) -> Self {
        Self { delegate }
    }

    /// Subscribe every handler of `handler`
    pub fn add(&self, handler: &Delegate<A, R>) {
        self.delegate.add(handler);
    }

    /// Unsubscribe one occurrence of each handler of `handler`
    pub fn remove(&self, handler: &Delegate<A, R>) {
        self.delegate.remove(handler);
    }
}

impl<A: ?Sized, R> Clone for Event<'_, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized, R> Copy for Event<'_, A, R> {}

impl<A: ?Sized, R> fmt::Debug for Event<'_, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event").finish_non_exhaustive()
    }
}

impl<A: ?Sized, R> AddAssign<&Delegate<A, R>> for Event<'_, A, R> {
    fn add_assign(&mut self, rhs: &Delegate<A, R>) {
        self.add(rhs);
    }
}

impl<A: ?Sized, R> AddAssign<Delegate<A, R>> for Event<'_, A, R> {
    fn add_assign(&mut self, rhs: Delegate<A, R>) {
        self.add(&rhs);
    }
}

impl<A: ?Sized, R> SubAssign<&Delegate<A, R>> for Event<'_, A, R> {
    fn sub_assign(&mut self, rhs: &Delegate<A, R>) {
        self.remove(rhs);
    }
}

impl<A: ?Sized, R> SubAssign<Delegate<A, R>> for Event<'_, A, R> {
    fn sub_assign(&mut self, rhs: Delegate<A, R>) {
        self.remove(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MethodId;
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    #[derive(Default)]
    struct Publisher {
        published: EventHandler<String>,
    }

    impl Publisher {
        fn published(&self) -> Event<'_, String> {
            self.published.event()
        }

        fn publish(&self, message: &str) {
            self.published.invoke(&message.to_string());
        }
    }

    fn collector(key: &str, sink: &Rc<RefCell<Vec<String>>>) -> EventHandler<String> {
        let sink = Rc::clone(sink);
        EventHandler::from_closure(MethodId::from_name(key), move |m: &String| {
            sink.borrow_mut().push(m.clone())
        })
        .unwrap()
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let publisher = Publisher::default();
        let sink = Rc::new(RefCell::new(Vec::new()));

        let mut event = publisher.published();
        event += collector("a", &sink);
        event += &collector("b", &sink);
        publisher.publish("hello");
        assert_eq!(*sink.borrow(), vec!["hello", "hello"]);

        event -= collector("a", &sink);
        publisher.publish("again");
        assert_eq!(sink.borrow().len(), 3);

        publisher.published().remove(&collector("b", &sink));
        publisher.publish("unheard");
        assert_eq!(sink.borrow().len(), 3);
        assert!(publisher.published.is_nil());
    }

    struct Renamed {
        sender: Weak<Account>,
        name: String,
    }

    struct Account {
        id: u32,
        renamed: EventHandler<Renamed>,
    }

    #[test]
    fn test_sender_travels_in_payload() {
        let account = Rc::new(Account {
            id: 7,
            renamed: EventHandler::new(),
        });
        let seen = Rc::new(Cell::new(0));
        let seen_by_handler = Rc::clone(&seen);
        account.renamed.event().add(
            &EventHandler::from_closure(MethodId::from_name("renamed"), move |e: &Renamed| {
                let sender = e.sender.upgrade().map_or(0, |a| a.id);
                assert_eq!(e.name, "savings");
                seen_by_handler.set(sender);
            })
            .unwrap(),
        );

        account.renamed.invoke(&Renamed {
            sender: Rc::downgrade(&account),
            name: "savings".to_string(),
        });
        assert_eq!(seen.get(), 7);
    }
}
