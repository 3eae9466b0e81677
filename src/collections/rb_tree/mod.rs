//! [`RBTree`], an ordered map backed by a red-black tree.
//!
//! # Structure
//!
//! Nodes are stored in an arena and linked by index. Every node knows its parent, which lets
//! the rebalancing walks climb the tree without a stack, and deletion of a node with two
//! children copies the in-order successor's entry into it and unlinks the successor instead.
//!
//! Duplicate keys are allowed: [`RBTree::add`] routes a key equal to a node's key into the
//! right subtree, and [`RBTree::remove_all`] removes every entry with a given key.
//!
//! # Example
//!
//! ```
//!     use rbtree::collections::RBTree;
//!     let mut capitals = RBTree::new();
//!     capitals.add("England", "London");
//!     capitals.add("France", "Paris");
//!     assert_eq!(capitals.find("France"), Some(&"Paris"));
//!     capitals.remove("England");
//!     assert_eq!(capitals.size(), 1);
//! ```

use std::{borrow::Borrow, fmt, fmt::Debug, mem};

use crate::collections::{TryReserveError, TryReserveErrorKind};

mod arena;
use arena::{Arena, Color, Handle, Node};

/// Longest possible root-to-leaf path, a red-black tree is never deeper than 2*log2(n+1).
const MAX_HEIGHT: usize = 2 * usize::BITS as usize + 2;

/// StkVec is used for traversal stacks, length is maximum tree height.
type StkVec<T> = arrayvec::ArrayVec<T, MAX_HEIGHT>;

/// Ordered map with guaranteed `O(log n)` [`add`](RBTree::add), [`find`](RBTree::find) and
/// [`remove`](RBTree::remove).
///
/// General guide to implementation:
///
/// [`RBTree`] has a length, an optional root and an `Arena` of nodes. Insertion attaches a red
/// leaf and then runs `insert_fixup`, deletion runs `delete_fixup` on a black node *before* it is
/// unlinked, so the sibling and parent it needs are still in place.
pub struct RBTree<K, V, A: Tuning = DefaultTuning> {
    len: usize,
    root: Option<Handle>,
    arena: Arena<K, V>,
    atune: A,
}

impl<K, V> Default for RBTree<K, V> {
    /// Creates an empty RBTree.
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuilds the tree by inserting the source entries in pre-order, so the copy is balanced on
/// its own terms rather than a replica of the source's shape.
impl<K: Clone + Ord, V: Clone, A: Tuning> Clone for RBTree<K, V, A> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_tuning(self.atune.clone());
        if let Err(e) = copy.try_reserve(self.len) {
            reserve_failed(e);
        }
        let mut stack: StkVec<Handle> = StkVec::new();
        stack.extend(self.root);
        while let Some(h) = stack.pop() {
            let node = &self.arena[h];
            copy.add(node.key.clone(), node.value.clone());
            stack.extend(node.right);
            stack.extend(node.left);
        }
        copy
    }
}

impl<K, V> RBTree<K, V> {
    /// Returns a new, empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(CustomTuning::default())
    }

    /// Returns a new, empty tree with room for `capacity` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use rbtree::collections::RBTree;
    /// let mut t = RBTree::with_capacity(100);
    /// for i in 0..100 { t.add(i, i * i); }
    /// assert_eq!(t.find(&7), Some(&49));
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut t = Self::new();
        if let Err(e) = t.try_reserve(capacity) {
            reserve_failed(e);
        }
        t
    }
}

impl<K, V, A: Tuning> RBTree<K, V, A> {
    /// Returns a new, empty tree with specified allocation tuning.
    ///
    /// # Example
    ///
    /// ```
    ///     use rbtree::collections::rb_tree::{RBTree,CustomTuning};
    ///     let mut t = RBTree::with_tuning(CustomTuning::new(64));
    ///     t.add("England", "London");
    ///     assert!(t.find("England").is_some());
    /// ```
    #[must_use]
    pub fn with_tuning(atune: A) -> Self {
        Self {
            len: 0,
            root: None,
            arena: Arena::new(),
            atune,
        }
    }

    /// Get a cloned copy of the tuning.
    pub fn get_tuning(&self) -> A {
        self.atune.clone()
    }

    /// Update the allocation tuning for the tree, returns the replaced tuning.
    pub fn set_tuning(&mut self, atune: A) -> A {
        mem::replace(&mut self.atune, atune)
    }

    /// Get number of key-value pairs in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Is the tree empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.len = 0;
        self.release();
    }

    /// Move the contents out into a new tree, leaving `self` empty (with the same tuning).
    ///
    /// # Example
    ///
    /// ```
    /// use rbtree::collections::RBTree;
    /// let mut a = RBTree::new();
    /// a.add(1, "one");
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b.find(&1), Some(&"one"));
    /// ```
    pub fn take(&mut self) -> Self {
        let empty = Self::with_tuning(self.atune.clone());
        mem::replace(self, empty)
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut result = 0;
        let mut stack: StkVec<(Handle, usize)> = StkVec::new();
        stack.extend(self.root.map(|h| (h, 1)));
        while let Some((h, depth)) = stack.pop() {
            result = result.max(depth);
            let node = &self.arena[h];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        result
    }

    /// Reserve room for at least `additional` more entries.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.arena.try_reserve(additional)
    }

    /// Insert a key-value pair. Duplicate keys are kept, the new entry goes to the right of
    /// any existing entries with an equal key.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes, aborts if allocation fails.
    pub fn add(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        if let Err(e) = self.try_add(key, value) {
            reserve_failed(e);
        }
    }

    /// Insert a key-value pair, returning an error if node storage could not be allocated.
    /// The tree is unchanged on error.
    pub fn try_add(&mut self, key: K, value: V) -> Result<(), TryReserveError>
    where
        K: Ord,
    {
        let h = self.attach(key, value)?;
        self.insert_fixup(h);
        self.len += 1;
        Ok(())
    }

    /// Returns a reference to the value for a key, or `None` if the key is absent.
    ///
    /// With duplicate keys, this is the entry met first on the descent from the root.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let h = self.search(key)?;
        Some(&self.arena[h].value)
    }

    /// Returns a mutable reference to the value for a key.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let h = self.search(key)?;
        Some(&mut self.arena[h].value)
    }

    /// Returns references to the stored key and value for a key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let node = &self.arena[self.search(key)?];
        Some((&node.key, &node.value))
    }

    /// Does the tree contain the key?
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Remove one entry for a key, returning its value. Does nothing if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove one entry for a key, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let target = self.search(key)?;
        let gone = self.delete_node(target);
        let node = self.arena.free(gone);
        self.len -= 1;
        debug_assert_eq!(self.len, self.arena.live());
        if self.len == 0 {
            self.release();
        }
        Some((node.key, node.value))
    }

    /// Remove every entry for a key, returns the number of entries removed.
    ///
    /// # Example
    ///
    /// ```
    /// use rbtree::collections::RBTree;
    /// let mut t = RBTree::new();
    /// t.add(5, 'a');
    /// t.add(3, 'b');
    /// t.add(5, 'c');
    /// assert_eq!(t.remove_all(&5), 2);
    /// assert_eq!(t.find(&5), None);
    /// assert_eq!(t.size(), 1);
    /// ```
    pub fn remove_all<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut n = 0;
        while self.remove_entry(key).is_some() {
            n += 1;
        }
        n
    }

    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q> + Ord,
        Q: Ord + ?Sized,
    {
        let mut cur = self.root;
        while let Some(h) = cur {
            let node = &self.arena[h];
            cur = match key.cmp(node.key.borrow()) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
                std::cmp::Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// Empty out the arena once no entries are left, letting the tuning decide on memory.
    fn release(&mut self) {
        self.root = None;
        self.arena.clear();
        if let Some(na) = self.atune.space_action((0, self.arena.capacity())) {
            self.arena.shrink_to(na);
        }
    }

    /// Visit entries in key order.
    fn walk<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let mut stack: StkVec<Handle> = StkVec::new();
        let mut cur = self.root;
        loop {
            while let Some(h) = cur {
                stack.push(h);
                cur = self.arena[h].left;
            }
            let Some(h) = stack.pop() else { break };
            let node = &self.arena[h];
            f(&node.key, &node.value);
            cur = node.right;
        }
    }

    /// Point the slot that held `old` under `parent` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let pn = &mut self.arena[p];
                if pn.left == Some(old) {
                    pn.left = new;
                } else {
                    assert!(pn.right == Some(old), "parent link out of step");
                    pn.right = new;
                }
            }
        }
    }

    fn rotate_left(&mut self, x: Handle) {
        let Some(y) = self.arena[x].right else {
            panic!("rotate_left on a node without a right child")
        };
        let parent = self.arena[x].parent;
        let inner = self.arena[y].left;
        self.arena[x].right = inner;
        if let Some(c) = inner {
            self.arena[c].parent = Some(x);
        }
        self.arena[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.arena[y].left = Some(x);
        self.arena[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: Handle) {
        let Some(y) = self.arena[x].left else {
            panic!("rotate_right on a node without a left child")
        };
        let parent = self.arena[x].parent;
        let inner = self.arena[y].right;
        self.arena[x].left = inner;
        if let Some(c) = inner {
            self.arena[c].parent = Some(x);
        }
        self.arena[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.arena[y].right = Some(x);
        self.arena[x].parent = Some(y);
    }

    /// Rotate `x` down towards the left (`to_left`) or right.
    fn rotate_down(&mut self, x: Handle, to_left: bool) {
        if to_left {
            self.rotate_left(x);
        } else {
            self.rotate_right(x);
        }
    }

    /// Descend to a free leaf position and hang a new red node there.
    fn attach(&mut self, key: K, value: V) -> Result<Handle, TryReserveError>
    where
        K: Ord,
    {
        let mut parent = None;
        let mut go_left = false;
        let mut cur = self.root;
        while let Some(h) = cur {
            let node = &self.arena[h];
            parent = Some(h);
            go_left = key < node.key;
            cur = if go_left { node.left } else { node.right };
        }
        let h = self
            .arena
            .alloc(Node::new(key, value, parent), &self.atune)?;
        match parent {
            None => self.root = Some(h),
            Some(p) if go_left => self.arena[p].left = Some(h),
            Some(p) => self.arena[p].right = Some(h),
        }
        Ok(h)
    }

    fn insert_case(&self, n: Handle) -> InsertCase {
        let Some(parent) = self.arena[n].parent else {
            return InsertCase::Root;
        };
        if self.arena[parent].color == Color::Black {
            return InsertCase::BlackParent;
        }
        // A red parent is never the root.
        let Some(grand) = self.arena.grandparent(n) else {
            panic!("red root")
        };
        if let Some(uncle) = self.arena.uncle(n) {
            if self.arena[uncle].color == Color::Red {
                return InsertCase::RedUncle {
                    parent,
                    uncle,
                    grand,
                };
            }
        }
        if self.arena.is_left_child(n) != self.arena.is_left_child(parent) {
            InsertCase::Triangle { parent }
        } else {
            InsertCase::Line { parent, grand }
        }
    }

    /// Restore the red-black invariants after `n` was attached as a red leaf.
    fn insert_fixup(&mut self, mut n: Handle) {
        loop {
            match self.insert_case(n) {
                InsertCase::Root => {
                    self.arena[n].color = Color::Black;
                    break;
                }
                InsertCase::BlackParent => break,
                InsertCase::RedUncle {
                    parent,
                    uncle,
                    grand,
                } => {
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    n = grand;
                }
                InsertCase::Triangle { parent } => {
                    let to_left = !self.arena.is_left_child(n);
                    self.rotate_down(parent, to_left);
                    // The old parent is now the child, and the shape is a line.
                    n = parent;
                }
                InsertCase::Line { parent, grand } => {
                    self.arena[parent].color = Color::Black;
                    self.arena[grand].color = Color::Red;
                    let to_left = !self.arena.is_left_child(parent);
                    self.rotate_down(grand, to_left);
                    break;
                }
            }
        }
    }

    /// Unlink the entry held by `target` from the tree, returns the handle of the node that was
    /// actually detached. That node holds the target's entry but may not be `target` itself.
    fn delete_node(&mut self, target: Handle) -> Handle {
        let mut n = target;
        loop {
            let node = &self.arena[n];
            let (left, right, parent) = (node.left, node.right, node.parent);
            match (left, right) {
                (None, None) => {
                    if self.arena[n].color == Color::Black {
                        self.delete_fixup(n);
                    }
                    let parent = self.arena[n].parent;
                    self.replace_child(parent, n, None);
                    return n;
                }
                (Some(child), None) | (None, Some(child)) => {
                    if parent.is_none() {
                        // Root: pull the child's entry up and remove the child instead.
                        self.arena.swap_entries(n, child);
                        n = child;
                        continue;
                    }
                    if self.arena[n].color == Color::Black {
                        self.delete_fixup(n);
                    }
                    let parent = self.arena[n].parent;
                    debug_assert!(parent.map_or(true, |p| self.arena[p].color == Color::Black));
                    self.replace_child(parent, n, Some(child));
                    self.arena[child].parent = parent;
                    return n;
                }
                (Some(_), Some(r)) => {
                    if self.arena[r].left.is_none() {
                        if parent.is_some() {
                            self.splice_successor(n, r);
                            return n;
                        }
                        self.arena.swap_entries(n, r);
                        n = r;
                    } else {
                        let succ = self.arena.leftmost(r);
                        self.arena.swap_entries(n, succ);
                        n = succ;
                    }
                }
            }
        }
    }

    /// Move `r`, the right child of `n` which has no left child, into `n`'s place.
    fn splice_successor(&mut self, n: Handle, r: Handle) {
        // r leaves its own position first: a black r is compensated by its red child if it
        // has one, otherwise by a fixup while it is still attached.
        if self.arena[r].color == Color::Black {
            match self.arena[r].right {
                Some(rr) => self.arena[rr].color = Color::Black,
                None => self.delete_fixup(r),
            }
        }
        let node = &self.arena[n];
        let (left, parent, color) = (node.left, node.parent, node.color);
        debug_assert!(node.right == Some(r) && self.arena[r].left.is_none());
        self.replace_child(parent, n, Some(r));
        let succ = &mut self.arena[r];
        succ.parent = parent;
        succ.left = left;
        succ.color = color;
        if let Some(l) = left {
            self.arena[l].parent = Some(r);
        }
    }

    fn delete_case(
        &self,
        sibling: Handle,
        near: Option<Handle>,
        far: Option<Handle>,
    ) -> DeleteCase {
        if self.arena[sibling].color == Color::Red {
            DeleteCase::RedSibling
        } else if !self.arena.is_red(near) && !self.arena.is_red(far) {
            DeleteCase::BlackNephews
        } else if !self.arena.is_red(far) {
            DeleteCase::NearNephewRed
        } else {
            DeleteCase::FarNephewRed
        }
    }

    /// Rebalance around the black node `x`, which is about to be detached and so counts one
    /// black short.
    fn delete_fixup(&mut self, mut x: Handle) {
        while Some(x) != self.root && self.arena[x].color == Color::Black {
            let Some(parent) = self.arena[x].parent else {
                unreachable!("non-root node without a parent")
            };
            let x_left = self.arena[parent].left == Some(x);
            let Some(sibling) = self.arena.sibling(x) else {
                panic!("black node without a sibling")
            };
            let (near, far) = if x_left {
                (self.arena[sibling].left, self.arena[sibling].right)
            } else {
                (self.arena[sibling].right, self.arena[sibling].left)
            };
            match self.delete_case(sibling, near, far) {
                DeleteCase::RedSibling => {
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_down(parent, x_left);
                }
                DeleteCase::BlackNephews => {
                    self.arena[sibling].color = Color::Red;
                    x = parent;
                }
                DeleteCase::NearNephewRed => {
                    if let Some(near) = near {
                        self.arena[near].color = Color::Black;
                    }
                    self.arena[sibling].color = Color::Red;
                    self.rotate_down(sibling, !x_left);
                }
                DeleteCase::FarNephewRed => {
                    self.arena[sibling].color = self.arena[parent].color;
                    self.arena[parent].color = Color::Black;
                    if let Some(far) = far {
                        self.arena[far].color = Color::Black;
                    }
                    self.rotate_down(parent, x_left);
                    break;
                }
            }
        }
        if Some(x) == self.root {
            log::trace!("delete fixup reached the root");
        }
        self.arena[x].color = Color::Black;
    }

    #[cfg(test)]
    pub(crate) fn check(&self)
    where
        K: Ord,
    {
        if let Some(root) = self.root {
            let rn = &self.arena[root];
            assert!(rn.parent.is_none(), "root has a parent");
            assert_eq!(rn.color, Color::Black, "root is red");
        }
        let (_, count) = self.check_subtree(self.root, None);
        assert_eq!(count, self.len, "len differs from node count");
        assert_eq!(self.arena.live(), self.len, "len differs from live slots");
        let mut prev: Option<&K> = None;
        self.walk(|k, _| {
            if let Some(p) = prev {
                assert!(p <= k, "keys out of order");
            }
            prev = Some(k);
        });
        let bound = 2.0 * ((self.len + 1) as f64).log2();
        assert!(self.height() as f64 <= bound, "tree too deep");
    }

    /// Returns (black height, node count) of a subtree, panics on a broken invariant.
    #[cfg(test)]
    fn check_subtree(&self, h: Option<Handle>, parent: Option<Handle>) -> (usize, usize) {
        let Some(h) = h else { return (0, 0) };
        let node = &self.arena[h];
        assert_eq!(node.parent, parent, "parent link mismatch");
        if node.color == Color::Red {
            assert!(
                !self.arena.is_red(node.left) && !self.arena.is_red(node.right),
                "red node with a red child"
            );
        }
        let (lb, lc) = self.check_subtree(node.left, Some(h));
        let (rb, rc) = self.check_subtree(node.right, Some(h));
        assert_eq!(lb, rb, "unequal black height");
        (lb + usize::from(node.color == Color::Black), lc + rc + 1)
    }
}

#[derive(Clone, Copy, Debug)]
enum InsertCase {
    Root,
    BlackParent,
    RedUncle {
        parent: Handle,
        uncle: Handle,
        grand: Handle,
    },
    /// Node and parent zig-zag below the grandparent.
    Triangle {
        parent: Handle,
    },
    /// Node, parent and grandparent in a straight line.
    Line {
        parent: Handle,
        grand: Handle,
    },
}

#[derive(Clone, Copy, Debug)]
enum DeleteCase {
    RedSibling,
    BlackNephews,
    NearNephewRed,
    FarNephewRed,
}

#[cold]
fn reserve_failed(e: TryReserveError) -> ! {
    match e.kind {
        TryReserveErrorKind::CapacityOverflow => panic!("capacity overflow"),
        TryReserveErrorKind::AllocError { layout } => std::alloc::handle_alloc_error(layout),
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> RBTree<K, V> {
        let mut t = RBTree::new();
        t.extend(iter);
        t
    }
}

impl<K: Ord, V, A: Tuning> Extend<(K, V)> for RBTree<K, V, A> {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K, Q, V, A: Tuning> std::ops::Index<&Q> for RBTree<K, V, A>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// Panics if the key is not present in the `RBTree`.
    fn index(&self, key: &Q) -> &V {
        self.find(key).expect("no entry found for key")
    }
}

impl<K: Debug, V: Debug, A: Tuning> Debug for RBTree<K, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        self.walk(|k, v| {
            m.entry(k, v);
        });
        m.finish()
    }
}

/// Trait for controlling storage allocation for [RBTree].
pub trait Tuning: Clone {
    /// Number of node slots to reserve when the node storage is full.
    fn grow_action(&self, len: usize, alloc: usize) -> usize;
    /// Returns the new allocation if the allocation should be reduced based on the current length and allocation.
    fn space_action(&self, state: (usize, usize)) -> Option<usize>;
}

/// Default allocation tuning.
pub type DefaultTuning = CustomTuning;

/// Implementation of [Tuning]. Default allocation unit is 16.
///
/// Storage grows by the larger of the allocation unit and the current length, and is released
/// when the tree empties if more than one allocation unit is spare.
#[derive(Clone, Debug)]
pub struct CustomTuning {
    alloc_unit: u16,
}

impl CustomTuning {
    /// Construct with specified allocation unit.
    pub fn new(alloc_unit: u16) -> Self {
        assert!(alloc_unit > 0);
        Self { alloc_unit }
    }
}

impl Default for CustomTuning {
    fn default() -> Self {
        Self { alloc_unit: 16 }
    }
}

impl Tuning for CustomTuning {
    fn grow_action(&self, len: usize, _alloc: usize) -> usize {
        len.max(self.alloc_unit as usize)
    }

    fn space_action(&self, (len, alloc): (usize, usize)) -> Option<usize> {
        if alloc - len > self.alloc_unit as usize {
            Some(len)
        } else {
            None
        }
    }
}

// Tests.

#[cfg(all(test, not(miri), feature = "cap"))]
#[global_allocator]
static ALLOCATOR: cap::Cap<std::alloc::System> = cap::Cap::new(std::alloc::System, usize::MAX);

#[cfg(test)]
fn print_memory() {
    #[cfg(all(test, not(miri), feature = "cap"))]
    println!("Memory allocated: {} bytes", ALLOCATOR.allocated());
}

/* mimalloc cannot be used with miri */
#[cfg(all(test, not(miri), not(feature = "cap")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(test)]
mod mytests;
