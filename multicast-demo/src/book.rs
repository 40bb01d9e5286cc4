//! Property-change scenario
//!
//! A [`Book`] publishes property changes through an [`Event`]. One watcher
//! handler unsubscribes itself the first time it runs, the other stays.

use crate::config::BookConfig;
use crate::report::{Step, Transcript};
use multicast_delegate::{Event, EventHandler};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Payload of a property-changed notification
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanged {
    pub property: &'static str,
    pub old_value: String,
    pub new_value: String,
}

pub struct Book {
    name: RefCell<String>,
    price: Cell<f64>,
    property_changed: EventHandler<PropertyChanged>,
}

impl Book {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: RefCell::new(name.into()),
            price: Cell::new(price),
            property_changed: EventHandler::new(),
        }
    }

    /// Subscribe to or unsubscribe from property changes
    pub fn property_changed(&self) -> Event<'_, PropertyChanged> {
        self.property_changed.event()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn set_name(&self, name: &str) {
        if *self.name.borrow() == name {
            return;
        }
        let old_value = self.name.replace(name.to_string());
        self.notify(PropertyChanged {
            property: "name",
            old_value,
            new_value: name.to_string(),
        });
    }

    pub fn price(&self) -> f64 {
        self.price.get()
    }

    pub fn set_price(&self, price: f64) {
        let old_price = self.price.replace(price);
        if old_price == price {
            return;
        }
        self.notify(PropertyChanged {
            property: "price",
            old_value: old_price.to_string(),
            new_value: price.to_string(),
        });
    }

    fn notify(&self, change: PropertyChanged) {
        if !self.property_changed.is_nil() {
            self.property_changed.invoke(&change);
        }
    }
}

/// Subscriber with one self-removing handler and one permanent handler
pub struct BookWatcher {
    me: Weak<BookWatcher>,
    book: Weak<Book>,
    log: RefCell<Vec<String>>,
}

impl BookWatcher {
    pub fn new(book: &Rc<Book>) -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            me: me.clone(),
            book: Rc::downgrade(book),
            log: RefCell::default(),
        })
    }

    /// Subscribe both handlers, `once` first
    pub fn watch(self: &Rc<Self>, book: &Book) {
        let changed = book.property_changed();
        changed.add(&EventHandler::bind(self, BookWatcher::once));
        changed.add(&EventHandler::bind(self, BookWatcher::forever));
    }

    pub fn once(&self, change: &PropertyChanged) {
        if let Some(book) = self.book.upgrade() {
            match EventHandler::bind_weak(&self.me, BookWatcher::once) {
                Ok(me) => book.property_changed().remove(&me),
                Err(e) => log::warn!("could not unsubscribe: {}", e),
            }
        }
        self.print("ONLY-ONCE-HANDLER", change);
    }

    pub fn forever(&self, change: &PropertyChanged) {
        self.print("FOREVER-HANDLER", change);
    }

    fn print(&self, tag: &str, change: &PropertyChanged) {
        self.log.borrow_mut().push(format!(
            "[{}]: {{ propertyName: {}, oldValue: {}, newValue: {} }}",
            tag, change.property, change.old_value, change.new_value
        ));
    }

    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

pub fn run(config: &BookConfig) -> Transcript {
    let book = Rc::new(Book::new(config.name.clone(), config.price));
    let watcher = BookWatcher::new(&book);
    watcher.watch(&book);

    let mut steps = Vec::new();

    book.set_name(&config.rename_to);
    log::debug!("book renamed to {}", book.name());
    steps.push(Step {
        action: format!("book.set_name({:?})", config.rename_to),
        is_nil: false,
        result: None,
        history: watcher.take_log(),
    });

    book.set_price(config.reprice_to);
    log::debug!("book repriced to {}", book.price());
    steps.push(Step {
        action: format!("book.set_price({})", config.reprice_to),
        is_nil: false,
        result: None,
        history: watcher.take_log(),
    });

    Transcript {
        scenario: "book".to_string(),
        steps,
    }
}
