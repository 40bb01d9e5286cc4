//! Immutable, shared handler lists
//!
//! A [`NodeList`] is never modified once built. [`NodeList::append`] and
//! [`NodeList::subtract`] always produce a new list (or hand back an existing
//! one), which is what lets a delegate be reassigned while an invocation is
//! still walking the previous list.
//!
//! The list is never empty: "no handlers" is represented by the absence of a
//! list (`None`) at the delegate level.

use crate::invocable::Invocable;
use crate::token::CallableToken;
use std::fmt;
use std::rc::Rc;

/// One registered handler: its equality key and its call target
pub struct Node<A: ?Sized, R> {
    token: CallableToken,
    target: Rc<dyn Invocable<A, R>>,
}

impl<A: ?Sized, R> Node<A, R> {
    pub fn new(token: CallableToken, target: Rc<dyn Invocable<A, R>>) -> Self {
        Self { token, target }
    }

    pub fn token(&self) -> &CallableToken {
        &self.token
    }

    /// Call the handler; `None` if it can no longer be reached
    pub fn invoke(&self, args: &A) -> Option<R> {
        self.target.invoke(args)
    }
}

impl<A: ?Sized, R> Clone for Node<A, R> {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            target: Rc::clone(&self.target),
        }
    }
}

impl<A: ?Sized, R> fmt::Debug for Node<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.token).finish()
    }
}

/// Reference-counted, immutable, ordered sequence of handler nodes
pub struct NodeList<A: ?Sized, R> {
    nodes: Rc<[Node<A, R>]>,
}

impl<A: ?Sized, R> NodeList<A, R> {
    /// A list holding exactly one node
    pub fn single(node: Node<A, R>) -> Self {
        Self {
            nodes: Rc::from(vec![node]),
        }
    }

    fn from_nodes(nodes: Vec<Node<A, R>>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self {
            nodes: Rc::from(nodes),
        }
    }

    /// `self` followed by `other`, both in their original order
    ///
    /// Handlers already present are not deduplicated: a token appended twice
    /// is invoked twice and has to be removed twice.
    pub fn append(&self, other: &NodeList<A, R>) -> NodeList<A, R> {
        let mut nodes = Vec::with_capacity(self.len() + other.len());
        nodes.extend(self.nodes.iter().cloned());
        nodes.extend(other.nodes.iter().cloned());
        Self::from_nodes(nodes)
    }

    /// Ordered multiset difference
    ///
    /// Each node of `other` cancels at most one node of `self`: the earliest
    /// equal node not already cancelled. Returns `None` when nothing is left,
    /// and a clone of `self` (same allocation) when nothing matched.
    pub fn subtract(&self, other: &NodeList<A, R>) -> Option<NodeList<A, R>> {
        if self.ptr_eq(other) {
            return None;
        }

        let mut consumed = vec![false; other.len()];
        let mut kept = Vec::with_capacity(self.len());
        for node in self.nodes.iter() {
            let matched = other
                .nodes
                .iter()
                .zip(consumed.iter())
                .position(|(candidate, used)| !*used && candidate.token == node.token);
            match matched {
                Some(index) => consumed[index] = true,
                None => kept.push(node.clone()),
            }
        }

        if kept.len() == self.len() {
            Some(self.clone())
        } else if kept.is_empty() {
            None
        } else {
            Some(Self::from_nodes(kept))
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a constructed list
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node<A, R>> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<A, R>> {
        self.nodes.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &CallableToken> + '_ {
        self.nodes.iter().map(Node::token)
    }

    pub fn contains(&self, token: &CallableToken) -> bool {
        self.tokens().any(|t| t == token)
    }

    /// True if both handles share one allocation
    pub fn ptr_eq(&self, other: &NodeList<A, R>) -> bool {
        Rc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Number of delegates and snapshots currently holding this list
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.nodes)
    }
}

impl<A: ?Sized, R> Clone for NodeList<A, R> {
    fn clone(&self) -> Self {
        Self {
            nodes: Rc::clone(&self.nodes),
        }
    }
}

impl<A: ?Sized, R> fmt::Debug for NodeList<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens()).finish()
    }
}
