use std::{
    alloc::Layout,
    mem,
    ops::{Index, IndexMut},
};

use super::Tuning;
use crate::collections::{TryReserveError, TryReserveErrorKind};

/// In debug mode or feature unsafe-optim not enabled, same as assert! otherwise does nothing.
#[cfg(any(debug_assertions, not(feature = "unsafe-optim")))]
macro_rules! safe_assert {
    ( $cond: expr ) => {
        assert!($cond)
    };
}

/// In debug mode or feature unsafe-optim not enabled, same as assert! otherwise does nothing.
#[cfg(all(not(debug_assertions), feature = "unsafe-optim"))]
macro_rules! safe_assert {
    ( $cond: expr ) => {
        if !$cond {
            unsafe { std::hint::unreachable_unchecked() }
        }
    };
}

/// Index of a node slot in an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Handle(usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Tree vertex. `left` and `right` are the owning edges, `parent` is only a back-reference.
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// New red leaf.
    pub fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }
}

enum Slot<K, V> {
    Live(Node<K, V>),
    /// Vacant, holds the next entry of the free list.
    Free(Option<Handle>),
}

/// Vec of node slots with a free list, so handles stay valid while other nodes come and go.
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Option<Handle>,
    live: usize,
}

#[cold]
#[track_caller]
fn dangling(h: Handle) -> ! {
    panic!("node handle {} does not refer to a live node", h.0)
}

impl<K, V> Arena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            live: 0,
        }
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Store a node, reusing a vacant slot if there is one.
    pub fn alloc<A: Tuning>(
        &mut self,
        node: Node<K, V>,
        atune: &A,
    ) -> Result<Handle, TryReserveError> {
        let h = match self.free {
            Some(h) => {
                match self.slots[h.0] {
                    Slot::Free(next) => self.free = next,
                    Slot::Live(_) => dangling(h),
                }
                self.slots[h.0] = Slot::Live(node);
                h
            }
            None => {
                let len = self.slots.len();
                if len == self.slots.capacity() {
                    let additional = atune.grow_action(len, self.slots.capacity()).max(1);
                    log::trace!("growing node arena from {len} by {additional} slots");
                    self.try_reserve(additional)?;
                }
                self.slots.push(Slot::Live(node));
                Handle(len)
            }
        };
        self.live += 1;
        Ok(h)
    }

    /// Vacate a slot, returning the node it held.
    pub fn free(&mut self, h: Handle) -> Node<K, V> {
        safe_assert!(h.0 < self.slots.len());
        match mem::replace(&mut self.slots[h.0], Slot::Free(self.free)) {
            Slot::Live(node) => {
                self.free = Some(h);
                self.live -= 1;
                node
            }
            Slot::Free(next) => {
                self.slots[h.0] = Slot::Free(next);
                dangling(h)
            }
        }
    }

    /// Reserve room for at least `additional` more slots.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let len = self.slots.len();
        self.slots.try_reserve_exact(additional).map_err(|_| {
            let kind = len
                .checked_add(additional)
                .and_then(|n| Layout::array::<Slot<K, V>>(n).ok())
                .map_or(TryReserveErrorKind::CapacityOverflow, |layout| {
                    TryReserveErrorKind::AllocError { layout }
                });
            TryReserveError { kind }
        })
    }

    /// Drop every node. Slots are dropped in sequence, the tree shape plays no part.
    pub fn clear(&mut self) {
        if self.live > 0 {
            log::trace!("dropping {} nodes", self.live);
        }
        self.slots.clear();
        self.free = None;
        self.live = 0;
    }

    pub fn shrink_to(&mut self, capacity: usize) {
        self.slots.shrink_to(capacity);
    }

    /// Exchange the key/value pairs of two live nodes, links and colors stay put.
    pub fn swap_entries(&mut self, a: Handle, b: Handle) {
        assert!(a != b);
        let (lo, hi) = if a.0 < b.0 { (a, b) } else { (b, a) };
        safe_assert!(hi.0 < self.slots.len());
        let (head, tail) = self.slots.split_at_mut(hi.0);
        match (&mut head[lo.0], &mut tail[0]) {
            (Slot::Live(x), Slot::Live(y)) => {
                mem::swap(&mut x.key, &mut y.key);
                mem::swap(&mut x.value, &mut y.value);
            }
            (Slot::Free(_), _) => dangling(lo),
            (_, Slot::Free(_)) => dangling(hi),
        }
    }

    /// Absent children count as black.
    pub fn is_red(&self, h: Option<Handle>) -> bool {
        h.map_or(false, |h| self[h].color == Color::Red)
    }

    pub fn is_left_child(&self, h: Handle) -> bool {
        match self[h].parent {
            Some(p) => self[p].left == Some(h),
            None => false,
        }
    }

    pub fn sibling(&self, h: Handle) -> Option<Handle> {
        let p = self[h].parent?;
        if self[p].left == Some(h) {
            self[p].right
        } else {
            self[p].left
        }
    }

    pub fn uncle(&self, h: Handle) -> Option<Handle> {
        self.sibling(self[h].parent?)
    }

    pub fn grandparent(&self, h: Handle) -> Option<Handle> {
        self[self[h].parent?].parent
    }

    /// Leftmost descendant of `h` (or `h` itself).
    pub fn leftmost(&self, mut h: Handle) -> Handle {
        while let Some(l) = self[h].left {
            h = l;
        }
        h
    }
}

impl<K, V> Index<Handle> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, h: Handle) -> &Node<K, V> {
        safe_assert!(h.0 < self.slots.len());
        match &self.slots[h.0] {
            Slot::Live(node) => node,
            Slot::Free(_) => dangling(h),
        }
    }
}

impl<K, V> IndexMut<Handle> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, h: Handle) -> &mut Node<K, V> {
        safe_assert!(h.0 < self.slots.len());
        match &mut self.slots[h.0] {
            Slot::Live(node) => node,
            Slot::Free(_) => dangling(h),
        }
    }
}
