//! Chain: the per-bucket singly-linked list.
//!
//! Nodes live in a generational arena (`SlotMap`) owned by the chain and link
//! to their successor by key, so the list has exactly one owner and no
//! pointers. Traversal always starts at `head` and follows `next` links,
//! which keeps iteration in append order regardless of how the arena reuses
//! slots after removals.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

struct Node<T> {
    value: T,
    next: Option<NodeKey>,
}

pub struct Chain<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links `value` in after the current tail.
    pub fn append(&mut self, value: T) {
        let k = self.nodes.insert(Node { value, next: None });
        match self.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(tail) => tail.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Unlinks and returns the value at position `index`, counting from
    /// `head`. Returns `None` when `index` is past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let mut prev: Option<NodeKey> = None;
        let mut cur = self.head?;
        for _ in 0..index {
            prev = Some(cur);
            cur = self.nodes.get(cur)?.next?;
        }

        let node = self.nodes.remove(cur)?;
        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.next = node.next,
            None => self.head = node.next,
        }
        if self.tail == Some(cur) {
            self.tail = prev;
        }
        Some(node.value)
    }

    /// First value matching `pred`, mutably.
    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            let next = node.next;
            if pred(&node.value) {
                return self.nodes.get_mut(k).map(|n| &mut n.value);
            }
            cur = next;
        }
        None
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over chain values from `head` to `tail`.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    cur: Option<NodeKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming iterator; pops values off the front in order.
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chain.remove_at(0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.chain.len();
        (n, Some(n))
    }
}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}
