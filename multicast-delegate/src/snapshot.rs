//! Invocation snapshots
//!
//! A [`Snapshot`] holds its own counted reference to the list a delegate had
//! when the snapshot was taken. Handlers that add or remove entries on the
//! delegate during an invocation replace the delegate's list, never the
//! pinned one, so the pass in progress always sees the list it started with.

use crate::delegate::Delegate;
use crate::node_list::{Node, NodeList};
use bitflags::bitflags;

bitflags! {
    /// Position of an entry within its snapshot
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntryFlags: u8 {
        const FIRST = 1 << 0;
        const LAST = 1 << 1;
    }
}

/// A pinned view of a delegate's handler list for one invocation pass
///
/// The pinned list is released when the snapshot is dropped, on every exit
/// path including unwinding out of a panicking handler.
#[derive(Debug)]
pub struct Snapshot<A: ?Sized, R> {
    pinned: Option<NodeList<A, R>>,
}

impl<A: ?Sized, R> Snapshot<A, R> {
    /// Pin the delegate's current list (nothing, if the delegate is nil)
    pub fn acquire(delegate: &Delegate<A, R>) -> Self {
        Self {
            pinned: delegate.current(),
        }
    }

    /// The entry at `index` with its position flags, or `None` past the end
    pub fn entry_at(&self, index: usize) -> Option<(&Node<A, R>, EntryFlags)> {
        let nodes = self.pinned.as_ref()?;
        let node = nodes.get(index)?;

        let mut flags = EntryFlags::empty();
        if index == 0 {
            flags |= EntryFlags::FIRST;
        }
        if index + 1 == nodes.len() {
            flags |= EntryFlags::LAST;
        }
        Some((node, flags))
    }

    /// Iterate entries front to back together with their flags
    pub fn entries(&self) -> impl Iterator<Item = (&Node<A, R>, EntryFlags)> + '_ {
        (0..).map_while(move |index| self.entry_at(index))
    }

    pub fn len(&self) -> usize {
        self.pinned.as_ref().map_or(0, NodeList::len)
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_none()
    }

    /// The pinned list itself
    pub fn pinned(&self) -> Option<&NodeList<A, R>> {
        self.pinned.as_ref()
    }

    /// Release the pinned list before the end of scope
    pub fn release(self) {}
}
