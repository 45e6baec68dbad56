use slab::Slab;
use std::vec;
use super::{Left, Link, Node, Right, Tree};

/// Walks the tree by following successor and predecessor links from both ends.
pub struct Iter<'a, K: 'a, V: 'a> {
    tree: &'a Tree<K, V>,
    front: Link,
    back: Link,
    size: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(tree: &'a Tree<K, V>) -> Self {
        Iter { tree, front: tree.first(), back: tree.last(), size: tree.len() }
    }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter { tree: self.tree, front: self.front, back: self.back, size: self.size }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.size == 0 { return None; }
        let id = self.front?;
        self.front = self.tree.step::<Right>(id);
        self.size -= 1;
        Some(self.tree.key_value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.size == 0 { return None; }
        let id = self.back?;
        self.back = self.tree.step::<Left>(id);
        self.size -= 1;
        Some(self.tree.key_value(id))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Hands out the values in key order.
///
/// The order is resolved up front so that each value can be borrowed mutably exactly once
/// through the slab's own iterator.
pub struct IterMut<'a, K: 'a, V: 'a>(vec::IntoIter<(&'a K, &'a mut V)>);

impl<'a, K, V> IterMut<'a, K, V> {
    pub fn new(tree: &'a mut Tree<K, V>) -> Self {
        let order = tree.in_order();
        let slots = order.iter().max().map_or(0, |&max| max + 1);

        let mut entries: Vec<Option<(&'a K, &'a mut V)>> = (0..slots).map(|_| None).collect();
        for (id, node) in tree.nodes.iter_mut() {
            let Node { key, value, .. } = node;
            entries[id] = Some((&*key, value));
        }

        let sorted: Vec<_> = order.into_iter().filter_map(|id| entries[id].take()).collect();
        IterMut(sorted.into_iter())
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// Takes ownership of the nodes and moves them out in key order.
#[derive(Clone)]
pub struct IntoIter<K, V> {
    nodes: Slab<Node<K, V>>,
    order: vec::IntoIter<usize>,
}

impl<K, V> IntoIter<K, V> {
    pub fn new(nodes: Slab<Node<K, V>>, order: Vec<usize>) -> Self {
        IntoIter { nodes, order: order.into_iter() }
    }

    fn take(&mut self, id: usize) -> (K, V) {
        let node = self.nodes.remove(id);
        (node.key, node.value)
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let id = self.order.next()?;
        Some(self.take(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.order.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let id = self.order.next_back()?;
        Some(self.take(id))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
