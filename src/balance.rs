//! Red-black rebalancing: rotations and the insertion and deletion fixups.
//!
//! Every procedure that has a mirror image is written once against a `Dir`, the side on which the
//! node being fixed hangs off its parent.

use log::trace;
use super::node::{Color, Dir, Left, Link, Right, Tree};

impl<K, V> Tree<K, V> {
    // Rotate `node` down towards `D`, lifting its child on the opposite side into its place:
    //
    //        |                         |
    //      (node)                    (pivot)
    //     /      \                  /       \
    //   {x}    (pivot)    ==>    (node)     {z}
    //          /     \           /    \
    //        {y}     {z}       {x}    {y}
    //
    // (drawn for `D = Left`)
    pub(crate) fn rotate<D: Dir>(&mut self, node: usize) {
        let pivot = match self.child::<D::Opposite>(node) {
            Some(pivot) => pivot,
            None => return,
        };

        let inner = self.child::<D>(pivot);
        self.set_child::<D::Opposite>(node, inner);
        if let Some(inner) = inner { self.nodes[inner].parent = Some(node); }

        let parent = self.parent(node);
        self.nodes[pivot].parent = parent;
        self.replace_child(parent, node, Some(pivot));

        self.set_child::<D>(pivot, Some(node));
        self.nodes[node].parent = Some(pivot);
    }

    /// Restores the red-black invariants after `node` was attached as a red leaf.
    pub(crate) fn insert_fixup(&mut self, mut node: usize) {
        while let Some(parent) = self.parent(node).filter(|&parent| self.is_red(Some(parent))) {
            // a red parent is never the root
            let grandparent = match self.parent(parent) {
                Some(grandparent) => grandparent,
                None => break,
            };

            node = if self.child::<Left>(grandparent) == Some(parent) {
                self.insert_fixup_side::<Left>(node, parent, grandparent)
            } else {
                self.insert_fixup_side::<Right>(node, parent, grandparent)
            };
        }

        if let Some(root) = self.root { self.paint(root, Color::Black); }
    }

    // `parent` is the `D` child of `grandparent`. Returns the node to continue from.
    fn insert_fixup_side<D: Dir>(&mut self, node: usize, parent: usize, grandparent: usize)
        -> usize {

        let uncle = self.child::<D::Opposite>(grandparent);

        if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
            trace!("insert fixup: red uncle, recoloring around {}", grandparent);
            self.paint(parent, Color::Black);
            self.paint(uncle, Color::Black);
            self.paint(grandparent, Color::Red);
            return grandparent;
        }

        let (mut node, mut parent) = (node, parent);

        if self.child::<D::Opposite>(parent) == Some(node) {
            trace!("insert fixup: inner child {}, rotating {}", node, parent);
            self.rotate::<D>(parent);
            std::mem::swap(&mut node, &mut parent);
        }

        trace!("insert fixup: outer child {}, rotating {}", node, grandparent);
        self.paint(parent, Color::Black);
        self.paint(grandparent, Color::Red);
        self.rotate::<D::Opposite>(grandparent);
        node
    }

    /// Restores the red-black invariants after a black node was unlinked from below `parent`,
    /// leaving `node` (possibly the leaf sentinel) one black short.
    pub(crate) fn remove_fixup(&mut self, mut node: Link, mut parent: Link) {
        while node != self.root && self.is_black(node) {
            let p = match parent {
                Some(p) => p,
                None => break,
            };

            (node, parent) = if self.child::<Left>(p) == node {
                self.remove_fixup_side::<Left>(p)
            } else {
                self.remove_fixup_side::<Right>(p)
            };
        }

        if let Some(node) = node { self.paint(node, Color::Black); }
    }

    // The short node is the `D` child of `parent`. Returns the next short node and its parent.
    fn remove_fixup_side<D: Dir>(&mut self, parent: usize) -> (Link, Link) {
        let mut sibling = self.child::<D::Opposite>(parent);

        if let Some(red) = sibling.filter(|&sibling| self.is_red(Some(sibling))) {
            trace!("remove fixup: red sibling {}, rotating {}", red, parent);
            self.paint(red, Color::Black);
            self.paint(parent, Color::Red);
            self.rotate::<D>(parent);
            sibling = self.child::<D::Opposite>(parent);
        }

        let mut sibling = match sibling {
            Some(sibling) => sibling,
            None => return (Some(parent), self.parent(parent)),
        };

        let near = self.child::<D>(sibling);
        let far = self.child::<D::Opposite>(sibling);

        if self.is_black(near) && self.is_black(far) {
            trace!("remove fixup: black nephews, pushing up from {}", parent);
            self.paint(sibling, Color::Red);
            return (Some(parent), self.parent(parent));
        }

        if self.is_black(far) {
            if let Some(near) = near {
                trace!("remove fixup: red near nephew {}, rotating {}", near, sibling);
                self.paint(near, Color::Black);
                self.paint(sibling, Color::Red);
                self.rotate::<D::Opposite>(sibling);
                sibling = near;
            }
        }

        trace!("remove fixup: red far nephew, rotating {}", parent);
        let color = self.color(Some(parent));
        self.paint(sibling, color);
        self.paint(parent, Color::Black);
        if let Some(far) = self.child::<D::Opposite>(sibling) { self.paint(far, Color::Black); }
        self.rotate::<D>(parent);

        (self.root, None)
    }
}

/// A broken red-black tree invariant, as reported by `Map::validate`.
#[cfg(any(test, feature = "invariants"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The root is red.
    #[error("root is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node in slot {0} has a red child")]
    RedChild(usize),
    /// Two paths below a node pass through different numbers of black nodes.
    #[error("unequal black heights below slot {0}")]
    BlackHeight(usize),
    /// A node's parent link does not point at the node whose child it is.
    #[error("slot {0} has a stale parent link")]
    ParentLink(usize),
    /// Two neighbors in the in-order sequence are out of order.
    #[error("slot {0} is ordered after its successor")]
    Order(usize),
    /// The number of reachable nodes differs from the number of stored nodes.
    #[error("{reachable} reachable nodes but {stored} stored")]
    Size { reachable: usize, stored: usize },
}

#[cfg(any(test, feature = "invariants"))]
impl<K, V> Tree<K, V> {
    /// Checks every red-black invariant, returning the black height of the tree.
    pub fn validate<C>(&self, cmp: &C) -> Result<usize, Violation>
        where C: compare::Compare<K> {

        if self.is_red(self.root) { return Err(Violation::RedRoot); }

        let mut reachable = 0;
        let height = self.validate_subtree(self.root, None, &mut reachable)?;

        if reachable != self.len() {
            return Err(Violation::Size { reachable, stored: self.len() });
        }

        let order = self.in_order();
        for pair in order.windows(2) {
            if cmp.compares_gt(&self.nodes[pair[0]].key, &self.nodes[pair[1]].key) {
                return Err(Violation::Order(pair[0]));
            }
        }

        Ok(height)
    }

    fn validate_subtree(&self, link: Link, parent: Link, reachable: &mut usize)
        -> Result<usize, Violation> {

        let id = match link {
            None => return Ok(0),
            Some(id) => id,
        };

        let node = &self.nodes[id];
        *reachable += 1;

        if node.parent != parent { return Err(Violation::ParentLink(id)); }

        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(Violation::RedChild(id));
        }

        let left = self.validate_subtree(node.left, link, reachable)?;
        let right = self.validate_subtree(node.right, link, reachable)?;
        if left != right { return Err(Violation::BlackHeight(id)); }

        Ok(left + usize::from(node.color == Color::Black))
    }
}
