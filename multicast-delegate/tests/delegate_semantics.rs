// Behavioural tests for delegates and events: ordering, multiset removal,
// reentrancy and list sharing.
use multicast_delegate::{Delegate, Event, EventHandler, MethodId};
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type Calls = Rc<RefCell<Vec<&'static str>>>;

struct Tracer {
    calls: Calls,
}

impl Tracer {
    fn h1(&self, _: &i32) -> i32 {
        self.calls.borrow_mut().push("h1");
        1
    }

    fn h2(&self, _: &i32) -> i32 {
        self.calls.borrow_mut().push("h2");
        2
    }

    fn h3(&self, _: &i32) -> i32 {
        self.calls.borrow_mut().push("h3");
        3
    }

    fn h4(&self, _: &i32) -> i32 {
        self.calls.borrow_mut().push("h4");
        4
    }
}

fn tracer() -> (Rc<Tracer>, Calls) {
    let calls: Calls = Rc::default();
    (Rc::new(Tracer { calls: Rc::clone(&calls) }), calls)
}

fn take(calls: &Calls) -> Vec<&'static str> {
    std::mem::take(&mut *calls.borrow_mut())
}

#[test]
fn test_invocation_follows_insertion_order() {
    init_logging();
    let (t, calls) = tracer();

    let handler = Delegate::new();
    handler.add(&Delegate::bind(&t, Tracer::h3));
    handler.add(&Delegate::bind(&t, Tracer::h1));
    handler.add(&Delegate::bind(&t, Tracer::h4));
    handler.add(&Delegate::bind(&t, Tracer::h2));

    assert_eq!(handler.invoke(&0), 2);
    assert_eq!(take(&calls), vec!["h3", "h1", "h4", "h2"]);
}

#[test]
fn test_remove_drops_exactly_one_occurrence() {
    init_logging();
    let (t, calls) = tracer();
    let h1 = Delegate::bind(&t, Tracer::h1);
    let h2 = Delegate::bind(&t, Tracer::h2);

    let handler = &(&(&h1 + &h2) + &h1) + &h1;
    handler.invoke(&0);
    assert_eq!(take(&calls), vec!["h1", "h2", "h1", "h1"]);

    handler.remove(&h1);
    handler.invoke(&0);
    assert_eq!(take(&calls), vec!["h2", "h1", "h1"]);

    // Not registered: nothing happens
    handler.remove(&Delegate::bind(&t, Tracer::h3));
    handler.invoke(&0);
    assert_eq!(take(&calls), vec!["h2", "h1", "h1"]);
}

#[test]
fn test_add_then_subtract_restores_original() {
    init_logging();
    let (t, calls) = tracer();
    let a = &Delegate::bind(&t, Tracer::h1) + &Delegate::bind(&t, Tracer::h2);
    let b = &Delegate::bind(&t, Tracer::h2) + &Delegate::bind(&t, Tracer::h3);

    a.invoke(&0);
    let expected = take(&calls);

    let restored = &(&a + &b) - &b;
    restored.invoke(&0);
    assert_eq!(take(&calls), expected);

    // Disjoint operands
    let c = Delegate::bind(&t, Tracer::h4);
    let restored = &(&a + &c) - &c;
    restored.invoke(&0);
    assert_eq!(take(&calls), expected);
}

#[test]
fn test_removing_groups_until_nil() {
    init_logging();
    let (t, calls) = tracer();
    let mut handler = Delegate::bind(&t, Tracer::h1);
    handler += Delegate::bind(&t, Tracer::h2);
    handler += Delegate::bind(&t, Tracer::h3);
    handler += Delegate::bind(&t, Tracer::h4);
    assert_eq!(handler.invoke(&0), 4);
    take(&calls);

    handler -= &Delegate::bind(&t, Tracer::h3) + &Delegate::bind(&t, Tracer::h4);
    assert_eq!(handler.invoke(&0), 2);
    assert_eq!(take(&calls), vec!["h1", "h2"]);

    handler -= &Delegate::bind(&t, Tracer::h1) + &Delegate::bind(&t, Tracer::h2);
    assert!(handler.is_nil());
    assert_eq!(handler.invoke_or(&0, -1), -1);
    assert!(take(&calls).is_empty());
}

#[test]
fn test_empty_void_delegate_does_nothing() {
    init_logging();
    let handler: Delegate<str> = Delegate::new();
    handler.invoke("ignored");
    assert!(handler.is_nil());
}

struct Once {
    me: Weak<Once>,
    owner: Rc<EventHandler<i32>>,
    calls: Calls,
}

impl Once {
    fn once(&self, _: &i32) {
        self.calls.borrow_mut().push("once");
        let me = Delegate::bind_weak(&self.me, Once::once).unwrap();
        self.owner.remove(&me);
    }

    fn forever(&self, _: &i32) {
        self.calls.borrow_mut().push("forever");
    }
}

#[test]
fn test_handler_unregisters_itself_during_invocation() {
    init_logging();
    let owner: Rc<EventHandler<i32>> = Rc::new(Delegate::new());
    let calls: Calls = Rc::default();
    let handler = Rc::new_cyclic(|me| Once {
        me: me.clone(),
        owner: Rc::clone(&owner),
        calls: Rc::clone(&calls),
    });

    owner.add(&Delegate::bind(&handler, Once::once));
    owner.add(&Delegate::bind(&handler, Once::forever));

    owner.invoke(&1);
    assert_eq!(take(&calls), vec!["once", "forever"]);
    assert_eq!(owner.len(), 1);

    owner.invoke(&2);
    owner.invoke(&3);
    assert_eq!(take(&calls), vec!["forever", "forever"]);
}

#[test]
fn test_handler_added_during_invocation_runs_next_time() {
    init_logging();
    let owner: Rc<Delegate<i32>> = Rc::new(Delegate::new());
    let calls: Calls = Rc::default();

    let late_calls = Rc::clone(&calls);
    let late = Delegate::from_closure(MethodId::from_name("late"), move |_: &i32| {
        late_calls.borrow_mut().push("late");
    })
    .unwrap();

    let weak_owner = Rc::downgrade(&owner);
    let subscriber_calls = Rc::clone(&calls);
    owner.add(
        &Delegate::from_closure(MethodId::from_name("subscriber"), move |_: &i32| {
            subscriber_calls.borrow_mut().push("subscriber");
            if let Some(owner) = weak_owner.upgrade() {
                owner.add(&late);
            }
        })
        .unwrap(),
    );

    owner.invoke(&0);
    assert_eq!(take(&calls), vec!["subscriber"]);
    assert_eq!(owner.len(), 2);

    // The second pass still sees two handlers, though a third is added meanwhile
    owner.invoke(&0);
    assert_eq!(take(&calls), vec!["subscriber", "late"]);
    assert_eq!(owner.len(), 3);
}

#[test]
fn test_handler_clears_owner_during_invocation() {
    init_logging();
    let (t, tracer_calls) = tracer();
    let owner: Rc<Delegate<i32, i32>> = Rc::new(Delegate::new());
    let calls: Calls = Rc::default();

    let weak_owner = Rc::downgrade(&owner);
    let clear_calls = Rc::clone(&calls);
    owner.add(
        &Delegate::from_closure(MethodId::from_name("clear"), move |_: &i32| {
            clear_calls.borrow_mut().push("clear");
            if let Some(owner) = weak_owner.upgrade() {
                owner.assign(&Delegate::new());
            }
            0
        })
        .unwrap(),
    );
    owner.add(&Delegate::bind(&t, Tracer::h2));

    // The pass in progress still reaches the second handler
    assert_eq!(owner.invoke(&0), 2);
    assert_eq!(take(&calls), vec!["clear"]);
    assert_eq!(take(&tracer_calls), vec!["h2"]);

    assert!(owner.is_nil());
    assert_eq!(owner.invoke_or(&0, -1), -1);
    assert!(take(&calls).is_empty());
}

fn explode(_: &i32) -> i32 {
    panic!("handler failure");
}

#[test]
fn test_panicking_handler_releases_snapshot() {
    init_logging();
    let (t, calls) = tracer();
    let failing = Delegate::from_fn(explode as fn(&i32) -> i32);
    let handler = &Delegate::bind(&t, Tracer::h1) + &failing;

    let pinned = handler.snapshot();
    let list = pinned.pinned().cloned().unwrap();
    pinned.release();
    let before = list.ref_count();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.invoke(&0)));
    assert!(outcome.is_err());
    assert_eq!(list.ref_count(), before);
    assert_eq!(take(&calls), vec!["h1"]);

    // The delegate is still usable afterwards
    handler.remove(&failing);
    assert_eq!(handler.invoke(&0), 1);
    assert_eq!(take(&calls), vec!["h1"]);
}

#[test]
fn test_shared_list_survives_release_of_one_holder() {
    init_logging();
    let (t, calls) = tracer();

    for _ in 0..100 {
        let a = &Delegate::bind(&t, Tracer::h1) + &Delegate::bind(&t, Tracer::h2);
        let b = Delegate::new();
        b.assign(&a);

        a.assign(&Delegate::bind(&t, Tracer::h3));
        drop(a);

        assert_eq!(b.invoke(&0), 2);
        b.remove(&Delegate::bind(&t, Tracer::h1));
        b.add(&Delegate::bind(&t, Tracer::h4));
        assert_eq!(b.invoke(&0), 4);
    }

    let recorded = take(&calls);
    assert_eq!(recorded.len(), 400);
    assert_eq!(&recorded[..4], &["h1", "h2", "h2", "h4"]);
}

#[test]
fn test_event_view_forwards_to_owner() {
    init_logging();
    let (t, calls) = tracer();
    let owner: Delegate<i32, i32> = Delegate::new();

    let mut event: Event<'_, i32, i32> = owner.event();
    event += Delegate::bind(&t, Tracer::h1);
    event += Delegate::bind(&t, Tracer::h2);
    event -= Delegate::bind(&t, Tracer::h1);

    assert_eq!(owner.invoke(&0), 2);
    assert_eq!(take(&calls), vec!["h2"]);
}
