//! Ordered station index backed by an arena-allocated red-black tree.
//!
//! Nodes live in a dense `Vec`; parent and child links are optional slot
//! indices. Parent links are back-references used by rotations, the fixup
//! passes, and in-order navigation. Removing a node releases its slot with
//! `swap_remove`, so a [`NodeId`] is only meaningful until the next mutation.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use crate::error::{Error, Result};
use crate::station::{Km, Station};

/// Handle to a node of a [`StationIndex`].
///
/// Handles are invalidated by any insertion or removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug)]
struct Node {
    station: Station,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Red-black tree invariant that [`StationIndex::check_invariants`] found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,
    #[error("red node at km {km} has a red child")]
    RedRedEdge { km: Km },
    #[error("subtrees of km {km} have different black heights")]
    BlackHeightMismatch { km: Km },
    #[error("km {km} is out of order")]
    OutOfOrder { km: Km },
    #[error("node at km {km} has a stale parent link")]
    BrokenParentLink { km: Km },
}

/// Balanced map from highway position to [`Station`].
#[derive(Debug, Default)]
pub struct StationIndex {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl StationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stations in the index.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Station stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was invalidated by a mutation of the index.
    pub fn station(&self, id: NodeId) -> &Station {
        &self.node(id).station
    }

    /// Locate the node holding the station at `km`.
    pub fn search_node(&self, km: Km) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match km.cmp(&node.station.km()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    pub fn search(&self, km: Km) -> Option<&Station> {
        self.search_node(km).map(|id| self.station(id))
    }

    /// Mutable access to a station. The position itself cannot change, so the
    /// ordering of the tree is unaffected.
    pub fn search_mut(&mut self, km: Km) -> Option<&mut Station> {
        let id = self.search_node(km)?;
        Some(&mut self.node_mut(id).station)
    }

    pub fn contains(&self, km: Km) -> bool {
        self.search_node(km).is_some()
    }

    /// Node with the lowest position.
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// Node with the highest position.
    pub fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// In-order next station by position.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// In-order previous station by position.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    /// Stations in increasing position order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            next: self.first(),
            remaining: self.len(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// Add a station, rebalancing as needed.
    ///
    /// Fails with [`Error::DuplicateStation`] and leaves the index untouched
    /// when the position is already taken.
    pub fn insert(&mut self, station: Station) -> Result<NodeId> {
        let km = station.km();
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            parent = Some(id);
            let node = self.node(id);
            side = match km.cmp(&node.station.km()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(Error::DuplicateStation { km }),
            };
            cursor = self.child(id, side);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            station,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.set_child(parent, side, Some(id)),
        }
        self.insert_fixup(id);
        Ok(id)
    }

    /// Remove and return the station at `km`.
    ///
    /// Fails with [`Error::StationNotFound`] and leaves the index untouched
    /// when no station exists there.
    pub fn remove(&mut self, km: Km) -> Result<Station> {
        let Some(target) = self.search_node(km) else {
            return Err(Error::StationNotFound { km });
        };

        // A node with two children takes over its successor's station and the
        // successor, which has no left child, is spliced out instead.
        let spliced = match (self.node(target).left, self.node(target).right) {
            (Some(_), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                self.swap_stations(target, successor);
                successor
            }
            _ => target,
        };

        self.splice_out(spliced);
        Ok(self.release(spliced))
    }

    /// Drop every station.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Verify the red-black and ordering invariants, returning the black
    /// height of the tree (0 for an empty index).
    pub fn check_invariants(&self) -> std::result::Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        if self.node(root).color == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }
        if self.node(root).parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink {
                km: self.node(root).station.km(),
            });
        }

        let mut previous: Option<Km> = None;
        for station in self.iter() {
            if previous.is_some_and(|previous| previous >= station.km()) {
                return Err(InvariantViolation::OutOfOrder { km: station.km() });
            }
            previous = Some(station.km());
        }

        self.black_height(Some(root))
    }

    fn black_height(&self, id: Option<NodeId>) -> std::result::Result<usize, InvariantViolation> {
        let Some(id) = id else {
            return Ok(1);
        };
        let node = self.node(id);
        let km = node.station.km();
        for child in [node.left, node.right].into_iter().flatten() {
            if self.node(child).parent != Some(id) {
                return Err(InvariantViolation::BrokenParentLink {
                    km: self.node(child).station.km(),
                });
            }
            if node.color == Color::Red && self.node(child).color == Color::Red {
                return Err(InvariantViolation::RedRedEdge { km });
            }
        }
        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { km });
        }
        Ok(left + usize::from(node.color == Color::Black))
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.node(id);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    fn side_of(&self, parent: NodeId, child: Option<NodeId>) -> Side {
        if self.node(parent).left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).color == Color::Red)
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Point `parent`'s link to `old` (or the root, without a parent) at `new`.
    /// The parent link of `new` is left to the caller.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                self.set_child(parent, side, new);
            }
        }
    }

    /// Follow `side` links from `id` to the end.
    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self.child(id, side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut current = id;
        let mut parent = self.parent(current);
        while let Some(up) = parent {
            if self.child(up, side) != Some(current) {
                break;
            }
            current = up;
            parent = self.parent(up);
        }
        parent
    }

    /// Rotate the subtree rooted at `x` towards `side`: the child on the
    /// opposite side takes `x`'s place and `x` becomes its `side` child.
    fn rotate(&mut self, x: NodeId, side: Side) {
        let Some(y) = self.child(x, side.opposite()) else {
            return;
        };
        let inner = self.child(y, side);
        self.set_child(x, side.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }
        let parent = self.parent(x);
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));
        self.set_child(y, side, Some(x));
        self.node_mut(x).parent = Some(y);
    }

    fn rotate_left(&mut self, x: NodeId) {
        self.rotate(x, Side::Left);
    }

    fn rotate_right(&mut self, x: NodeId) {
        self.rotate(x, Side::Right);
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(mut parent) = self.parent(z).filter(|&p| self.is_red(Some(p))) {
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };
            let side = self.side_of(grandparent, Some(parent));
            let uncle = self.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|&u| self.is_red(Some(u))) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            if self.child(parent, side.opposite()) == Some(z) {
                match side {
                    Side::Left => self.rotate_left(parent),
                    Side::Right => self.rotate_right(parent),
                }
                std::mem::swap(&mut z, &mut parent);
            }
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            match side {
                Side::Left => self.rotate_right(grandparent),
                Side::Right => self.rotate_left(grandparent),
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlink `id`, which has at most one child, and restore the black height
    /// if a black node was taken out.
    fn splice_out(&mut self, id: NodeId) {
        let node = self.node(id);
        let child = node.left.or(node.right);
        let parent = node.parent;
        let color = node.color;

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, id, child);

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
    }

    /// `x` carries an extra black. It may be absent (a leaf position), so its
    /// parent is tracked alongside it.
    fn remove_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };
            let side = self.side_of(p, x);

            let mut sibling = self.child(p, side.opposite());
            if let Some(red_sibling) = sibling.filter(|&s| self.is_red(Some(s))) {
                self.set_color(red_sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.child(p, side.opposite());
            }
            // The deficit side is one black short, so the sibling side holds
            // at least one real node.
            let Some(mut w) = sibling else {
                break;
            };

            if !self.is_red(self.child(w, Side::Left)) && !self.is_red(self.child(w, Side::Right)) {
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !self.is_red(self.child(w, side.opposite())) {
                if let Some(near) = self.child(w, side) {
                    self.set_color(near, Color::Black);
                }
                self.set_color(w, Color::Red);
                self.rotate(w, side.opposite());
                let Some(rotated) = self.child(p, side.opposite()) else {
                    break;
                };
                w = rotated;
            }

            let parent_color = self.node(p).color;
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.child(w, side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    fn swap_stations(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (low, high) = (a.0.min(b.0), a.0.max(b.0));
        let (head, tail) = self.nodes.split_at_mut(high);
        std::mem::swap(&mut head[low].station, &mut tail[0].station);
    }

    /// Free the slot of an already unlinked node. The last node of the arena
    /// moves into the slot and its neighbours are relinked.
    fn release(&mut self, id: NodeId) -> Station {
        let last = NodeId(self.nodes.len() - 1);
        if id != last {
            let (parent, left, right) = {
                let moved = self.node(last);
                (moved.parent, moved.left, moved.right)
            };
            self.replace_child(parent, last, Some(id));
            for child in [left, right].into_iter().flatten() {
                self.node_mut(child).parent = Some(id);
            }
        }
        self.nodes.swap_remove(id.0).station
    }
}

/// In-order iterator over the stations of a [`StationIndex`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    index: &'a StationIndex,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.index.successor(id);
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.index.station(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a StationIndex {
    type Item = &'a Station;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
