//! `BrandedDoublyLinkedList` - a token-gated doubly linked list.
//!
//! Nodes live in an arena built from two `BrandedVec`s, and links are slot
//! indices instead of pointers. Every insertion returns a [`NodeHandle`], and
//! [`remove`](BrandedDoublyLinkedList::remove) detaches that node in O(1) using
//! only its own `prev`/`next` links. Callers that keep handles (the graph keeps
//! one per edge end) can therefore delete from the middle without a search.
//!
//! # Layout
//! Structure-of-Arrays:
//! - `links`: prev/next pointers plus the slot generation. Structural operations
//!   only touch this vector.
//! - `values`: element data, read only when a value is requested.
//!
//! Freed slots go onto a free list and bump their generation, so a handle to a
//! removed node never resolves again, even after its slot is reused.

use crate::collections::BrandedVec;
use crate::GhostToken;
use core::fmt;

/// Handle to one node of a [`BrandedDoublyLinkedList`].
///
/// A handle stays valid until its node is removed; afterwards every operation
/// taking it is a no-op returning `None`/`false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u32,
}

impl NodeHandle {
    /// A handle that names no node in any list.
    ///
    /// Useful as a placeholder while a record that must hold a handle is
    /// created before the node it will point at.
    #[inline]
    pub const fn dangling() -> Self {
        Self {
            index: usize::MAX,
            generation: u32::MAX,
        }
    }

    /// Slot index of the node inside its list's arena.
    ///
    /// Stable for the node's whole life, so it can index side tables.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Link cell for one arena slot. Free slots form a singly linked free list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkSlot {
    Occupied {
        prev: Option<usize>,
        next: Option<usize>,
        generation: u32,
    },
    Free {
        next_free: Option<usize>,
        generation: u32,
    },
}

/// Arena-backed doubly linked list whose nodes stay addressable by [`NodeHandle`].
pub struct BrandedDoublyLinkedList<'brand, T> {
    links: BrandedVec<'brand, LinkSlot>,
    /// `None` exactly for free slots.
    values: BrandedVec<'brand, Option<T>>,

    head: Option<usize>,
    tail: Option<usize>,
    free_head: Option<usize>,
    len: usize,
}

impl<'brand, T> BrandedDoublyLinkedList<'brand, T> {
    /// Creates a list with no nodes and no allocated slots.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: BrandedVec::with_capacity(capacity),
            values: BrandedVec::with_capacity(capacity),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no node is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Unlinks every node; outstanding handles become stale.
    pub fn clear(&mut self, token: &mut GhostToken<'brand>) {
        while self.pop_front(token).is_some() {}
    }

    /// Returns `(prev, next)` if `handle` names a live node of this list.
    fn live_links(&self, token: &GhostToken<'brand>, handle: NodeHandle) -> Option<(Option<usize>, Option<usize>)> {
        match self.links.get(token, handle.index)? {
            LinkSlot::Occupied { prev, next, generation } if *generation == handle.generation => {
                Some((*prev, *next))
            }
            _ => None,
        }
    }

    /// Builds the handle of an occupied slot reached through internal links.
    fn handle_of(&self, token: &GhostToken<'brand>, index: usize) -> NodeHandle {
        match self.links.borrow(token, index) {
            LinkSlot::Occupied { generation, .. } => NodeHandle {
                index,
                generation: *generation,
            },
            LinkSlot::Free { .. } => panic!("Corrupted list: link points to free slot {index}"),
        }
    }

    /// Allocates a detached node slot, reusing a free one when possible.
    fn alloc(&mut self, token: &mut GhostToken<'brand>, value: T) -> NodeHandle {
        if let Some(free_idx) = self.free_head {
            let slot = self.links.borrow_mut(token, free_idx);
            let (next_free, generation) = match *slot {
                LinkSlot::Free { next_free, generation } => (next_free, generation),
                LinkSlot::Occupied { .. } => panic!("Corrupted free list"),
            };
            *slot = LinkSlot::Occupied {
                prev: None,
                next: None,
                generation,
            };
            *self.values.borrow_mut(token, free_idx) = Some(value);
            self.free_head = next_free;
            NodeHandle {
                index: free_idx,
                generation,
            }
        } else {
            let index = self.links.len();
            self.links.push(LinkSlot::Occupied {
                prev: None,
                next: None,
                generation: 0,
            });
            self.values.push(Some(value));
            NodeHandle { index, generation: 0 }
        }
    }

    /// Returns the slot to the free list and moves its value out.
    ///
    /// Links pointing at this node must already be rewired.
    fn free(&mut self, token: &mut GhostToken<'brand>, index: usize) -> T {
        let slot = self.links.borrow_mut(token, index);
        let generation = match *slot {
            LinkSlot::Occupied { generation, .. } => generation,
            LinkSlot::Free { .. } => panic!("Corrupted list: double free of slot {index}"),
        };
        *slot = LinkSlot::Free {
            next_free: self.free_head,
            generation: generation.wrapping_add(1),
        };
        self.free_head = Some(index);
        match self.values.borrow_mut(token, index).take() {
            Some(value) => value,
            None => panic!("Corrupted list: occupied slot {index} has no value"),
        }
    }

    fn set_prev(&self, token: &mut GhostToken<'brand>, index: usize, to: Option<usize>) {
        if let LinkSlot::Occupied { prev, .. } = self.links.borrow_mut(token, index) {
            *prev = to;
        }
    }

    fn set_next(&self, token: &mut GhostToken<'brand>, index: usize, to: Option<usize>) {
        if let LinkSlot::Occupied { next, .. } = self.links.borrow_mut(token, index) {
            *next = to;
        }
    }

    /// Links `value` before the current head and returns its handle.
    pub fn push_front(&mut self, token: &mut GhostToken<'brand>, value: T) -> NodeHandle {
        let handle = self.alloc(token, value);
        let old_head = self.head;

        match old_head {
            Some(head_idx) => self.set_prev(token, head_idx, Some(handle.index)),
            None => self.tail = Some(handle.index),
        }
        self.set_next(token, handle.index, old_head);

        self.head = Some(handle.index);
        self.len += 1;
        handle
    }

    /// Links `value` after the current tail and returns its handle.
    pub fn push_back(&mut self, token: &mut GhostToken<'brand>, value: T) -> NodeHandle {
        let handle = self.alloc(token, value);
        let old_tail = self.tail;

        match old_tail {
            Some(tail_idx) => self.set_next(token, tail_idx, Some(handle.index)),
            None => self.head = Some(handle.index),
        }
        self.set_prev(token, handle.index, old_tail);

        self.tail = Some(handle.index);
        self.len += 1;
        handle
    }

    /// Removes the node named by `handle`, returning its value.
    ///
    /// O(1): only the node's neighbours are rewired. Returns `None` without
    /// touching the list if the handle is stale (node already removed) or
    /// out of range.
    pub fn remove(&mut self, token: &mut GhostToken<'brand>, handle: NodeHandle) -> Option<T> {
        let (prev_idx, next_idx) = self.live_links(token, handle)?;

        match prev_idx {
            Some(prev) => self.set_next(token, prev, next_idx),
            None => self.head = next_idx,
        }
        match next_idx {
            Some(next) => self.set_prev(token, next, prev_idx),
            None => self.tail = prev_idx,
        }

        self.len -= 1;
        Some(self.free(token, handle.index))
    }

    /// Unlinks the head node and returns its value.
    pub fn pop_front(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        let handle = self.front_handle(token)?;
        self.remove(token, handle)
    }

    /// Unlinks the tail node and returns its value.
    pub fn pop_back(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        let handle = self.back_handle(token)?;
        self.remove(token, handle)
    }

    /// Returns `true` if `handle` names a live node of this list.
    pub fn contains(&self, token: &GhostToken<'brand>, handle: NodeHandle) -> bool {
        self.live_links(token, handle).is_some()
    }

    /// Handle of the first node.
    pub fn front_handle(&self, token: &GhostToken<'brand>) -> Option<NodeHandle> {
        self.head.map(|idx| self.handle_of(token, idx))
    }

    /// Handle of the last node.
    pub fn back_handle(&self, token: &GhostToken<'brand>) -> Option<NodeHandle> {
        self.tail.map(|idx| self.handle_of(token, idx))
    }

    /// Handle of the node after `handle`, or `None` at the end or for a stale handle.
    pub fn next_handle(&self, token: &GhostToken<'brand>, handle: NodeHandle) -> Option<NodeHandle> {
        let (_, next) = self.live_links(token, handle)?;
        next.map(|idx| self.handle_of(token, idx))
    }

    /// Handle of the node before `handle`, or `None` at the start or for a stale handle.
    pub fn prev_handle(&self, token: &GhostToken<'brand>, handle: NodeHandle) -> Option<NodeHandle> {
        let (prev, _) = self.live_links(token, handle)?;
        prev.map(|idx| self.handle_of(token, idx))
    }

    /// Value of the head node.
    pub fn front<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.values.get(token, self.head?)?.as_ref()
    }

    /// Value of the tail node.
    pub fn back<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.values.get(token, self.tail?)?.as_ref()
    }

    /// Returns a reference to the element behind `handle`.
    pub fn get<'a>(&'a self, token: &'a GhostToken<'brand>, handle: NodeHandle) -> Option<&'a T> {
        self.live_links(token, handle)?;
        self.values.get(token, handle.index)?.as_ref()
    }

    /// Returns a mutable reference to the element behind `handle`.
    pub fn get_mut<'a>(&'a self, token: &'a mut GhostToken<'brand>, handle: NodeHandle) -> Option<&'a mut T> {
        self.live_links(token, handle)?;
        self.values.get_mut(token, handle.index)?.as_mut()
    }

    /// Iterates over the list elements front to back.
    pub fn iter<'a>(&'a self, token: &'a GhostToken<'brand>) -> BrandedDoublyLinkedListIter<'a, 'brand, T> {
        BrandedDoublyLinkedListIter {
            inner: self.handles(token),
        }
    }

    /// Iterates over `(handle, element)` pairs front to back.
    pub fn handles<'a>(&'a self, token: &'a GhostToken<'brand>) -> Handles<'a, 'brand, T> {
        Handles {
            list: self,
            current: self.head,
            remaining: self.len,
            token,
        }
    }
}

impl<'brand, T> Default for BrandedDoublyLinkedList<'brand, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'brand, T> FromIterator<T> for BrandedDoublyLinkedList<'brand, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: BrandedVec<'brand, Option<T>> = iter.into_iter().map(Some).collect();
        let len = values.len();
        if len == 0 {
            return Self::new();
        }

        let links = (0..len)
            .map(|i| LinkSlot::Occupied {
                prev: i.checked_sub(1),
                next: if i + 1 == len { None } else { Some(i + 1) },
                generation: 0,
            })
            .collect();

        Self {
            links,
            values,
            head: Some(0),
            tail: Some(len - 1),
            free_head: None,
            len,
        }
    }
}

/// Iterator over `(NodeHandle, &T)` in list order.
pub struct Handles<'a, 'brand, T> {
    list: &'a BrandedDoublyLinkedList<'brand, T>,
    current: Option<usize>,
    remaining: usize,
    token: &'a GhostToken<'brand>,
}

impl<'a, 'brand, T> Iterator for Handles<'a, 'brand, T> {
    type Item = (NodeHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        match self.list.links.borrow(self.token, idx) {
            LinkSlot::Occupied { next, generation, .. } => {
                self.current = *next;
                self.remaining -= 1;
                let value = self.list.values.borrow(self.token, idx).as_ref()?;
                Some((
                    NodeHandle {
                        index: idx,
                        generation: *generation,
                    },
                    value,
                ))
            }
            LinkSlot::Free { .. } => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, 'brand, T> ExactSizeIterator for Handles<'a, 'brand, T> {}

/// Iterator over list elements front to back.
pub struct BrandedDoublyLinkedListIter<'a, 'brand, T> {
    inner: Handles<'a, 'brand, T>,
}

impl<'a, 'brand, T> Iterator for BrandedDoublyLinkedListIter<'a, 'brand, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, 'brand, T> ExactSizeIterator for BrandedDoublyLinkedListIter<'a, 'brand, T> {}

impl<'brand, T> fmt::Debug for BrandedDoublyLinkedList<'brand, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrandedDoublyLinkedList")
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushes_and_pops_at_both_ends() {
        GhostToken::new(|mut token| {
            let mut list = BrandedDoublyLinkedList::new();

            let h1 = list.push_back(&mut token, 1);
            let h2 = list.push_back(&mut token, 2);
            let h0 = list.push_front(&mut token, 0);

            assert_eq!(list.len(), 3);
            assert_eq!((h1.index(), h2.index(), h0.index()), (0, 1, 2));

            assert_eq!(list.pop_front(&mut token), Some(0));
            assert_eq!(list.pop_back(&mut token), Some(2));
            assert_eq!(list.pop_back(&mut token), Some(1));
            assert_eq!(list.pop_back(&mut token), None);
            assert!(list.is_empty());
        });
    }

    #[test]
    fn test_remove_middle_by_handle() {
        GhostToken::new(|mut token| {
            let mut list = BrandedDoublyLinkedList::new();
            list.push_back(&mut token, 'a');
            let b = list.push_back(&mut token, 'b');
            list.push_back(&mut token, 'c');

            assert_eq!(list.remove(&mut token, b), Some('b'));
            assert_eq!(list.iter(&token).copied().collect::<String>(), "ac");
            assert_eq!(list.len(), 2);
        });
    }

    #[test]
    fn test_remove_head_and_tail_keeps_ends() {
        GhostToken::new(|mut token| {
            let mut list = BrandedDoublyLinkedList::new();
            let first = list.push_back(&mut token, 1);
            list.push_back(&mut token, 2);
            let last = list.push_back(&mut token, 3);

            list.remove(&mut token, first);
            assert_eq!(list.front(&token), Some(&2));
            list.remove(&mut token, last);
            assert_eq!(list.back(&token), Some(&2));
            assert_eq!(list.front_handle(&token), list.back_handle(&token));
        });
    }

    #[test]
    fn test_stale_handle_is_noop() {
        GhostToken::new(|mut token| {
            let mut list = BrandedDoublyLinkedList::new();
            let h = list.push_back(&mut token, 10);
            assert_eq!(list.remove(&mut token, h), Some(10));
            assert_eq!(list.remove(&mut token, h), None);

            // The slot is reused, but the old handle must not resolve to the new node.
            let reused = list.push_back(&mut token, 20);
            assert_eq!(reused.index(), h.index());
            assert_ne!(reused, h);
            assert!(!list.contains(&token, h));
            assert_eq!(list.get(&token, h), None);
            assert_eq!(list.remove(&mut token, h), None);
            assert_eq!(list.len(), 1);
            assert_eq!(list.get(&token, reused), Some(&20));
            assert!(!list.contains(&token, NodeHandle::dangling()));
        });
    }

    #[test]
    fn test_handle_traversal() {
        GhostToken::new(|mut token| {
            let list: BrandedDoublyLinkedList<'_, i32> = (1..=3).collect();
            let front = list.front_handle(&token).unwrap();
            let second = list.next_handle(&token, front).unwrap();
            assert_eq!(list.get(&token, second), Some(&2));
            assert_eq!(list.prev_handle(&token, second), Some(front));

            *list.get_mut(&mut token, second).unwrap() = 20;
            let collected: Vec<i32> = list.iter(&token).copied().collect();
            assert_eq!(collected, vec![1, 20, 3]);

            let back = list.back_handle(&token).unwrap();
            assert_eq!(list.next_handle(&token, back), None);
            assert_eq!(list.handles(&token).len(), 3);
        });
    }

    #[test]
    fn test_iter_is_restartable_and_clear() {
        GhostToken::new(|mut token| {
            let mut list = BrandedDoublyLinkedList::new();
            for i in 0..5 {
                list.push_back(&mut token, i);
            }
            assert_eq!(list.iter(&token).count(), 5);
            assert_eq!(list.iter(&token).sum::<i32>(), 10);

            list.clear(&mut token);
            assert!(list.is_empty());
            assert_eq!(list.iter(&token).next(), None);
            let reused = list.push_back(&mut token, 7);
            assert!(reused.index() < 5);
        });
    }
}
