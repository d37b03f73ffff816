//! Title ordering over the catalog's book arena.
//!
//! A plain binary search tree: no balancing, so titles inserted in sorted
//! order degrade it into a chain. Equal titles descend to the right, which
//! keeps them in insertion order during traversal.

use crate::catalog::BookKey;

/// A tree node, addressed by its position in the node arena
#[derive(Debug, Clone)]
struct Node {
    /// Book this node refers to
    key: BookKey,
    /// Sort key
    title: String,
    /// Subtree with strictly smaller titles
    left: Option<usize>,
    /// Subtree with greater or equal titles
    right: Option<usize>,
}

/// Unbalanced title-ordered tree of arena keys
#[derive(Debug, Clone, Default)]
pub struct CatalogOrder {
    /// Node arena
    nodes: Vec<Node>,
    /// Position of the root node
    root: Option<usize>,
}

impl CatalogOrder {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a key in title order
    pub fn insert(&mut self, key: BookKey, title: &str) {
        let new_node = self.nodes.len();
        self.nodes.push(Node { key, title: title.to_owned(), left: None, right: None });

        let Some(mut current) = self.root else {
            self.root = Some(new_node);
            return;
        };

        while let Some(node) = self.nodes.get_mut(current) {
            let slot = if title < node.title.as_str() { &mut node.left } else { &mut node.right };
            if let Some(child) = *slot {
                current = child;
            } else {
                *slot = Some(new_node);
                return;
            }
        }
    }

    /// Number of keys in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(usize, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((position, level)) = pending.pop() {
            deepest = deepest.max(level);
            if let Some(node) = self.nodes.get(position) {
                let below = level.saturating_add(1);
                pending.extend(node.left.map(|child| (child, below)));
                pending.extend(node.right.map(|child| (child, below)));
            }
        }
        deepest
    }

    /// Lazy in-order traversal, yielding keys by ascending title
    #[must_use]
    pub fn iter(&self) -> InOrder<'_> {
        InOrder { nodes: &self.nodes, stack: Vec::new(), cursor: self.root }
    }
}

impl<'a> IntoIterator for &'a CatalogOrder {
    type Item = BookKey;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order walk over a [`CatalogOrder`] using an explicit stack
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    /// Node arena being walked
    nodes: &'a [Node],
    /// Ancestors whose left subtree is being visited
    stack: Vec<usize>,
    /// Next subtree to descend into
    cursor: Option<usize>,
}

impl Iterator for InOrder<'_> {
    type Item = BookKey;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(position) = self.cursor {
            self.stack.push(position);
            self.cursor = self.nodes.get(position).and_then(|node| node.left);
        }

        let node = self.nodes.get(self.stack.pop()?)?;
        self.cursor = node.right;
        Some(node.key)
    }
}
