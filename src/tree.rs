use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`] arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        // Representative of the preceding (left) child; only used for ordering.
        // Subtrees are disjoint, so no two live nodes share one.
        representative: u8,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match *self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => frequency,
        }
    }

    pub fn representative(&self) -> u8 {
        match *self {
            Node::Leaf { symbol, .. } => symbol,
            Node::Internal { representative, .. } => representative,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Total order used for tie-breaking: frequency first, then representative symbol.
    pub fn precedes(&self, other: &Node) -> bool {
        (self.frequency(), self.representative()) < (other.frequency(), other.representative())
    }
}

/// Heap entry. `BinaryHeap` is a max-heap, so the ordering is reversed.
#[derive(Debug, PartialEq, Eq)]
struct Pending {
    frequency: u64,
    representative: u8,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.frequency, other.representative, other.id).cmp(&(
            self.frequency,
            self.representative,
            self.id,
        ))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A canonical Huffman tree. Nodes live in an arena; parents refer to children by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Builds the tree for every symbol with non-zero frequency.
    ///
    /// Returns `None` for an all-zero table. A table with a single symbol yields a
    /// tree whose root is that leaf.
    pub fn build(freq: &FrequencyTable) -> Option<Self> {
        let leaves = freq.distinct_symbols();
        if leaves == 0 {
            return None;
        }

        let mut nodes = Vec::with_capacity(2 * leaves - 1);
        let mut heap = BinaryHeap::with_capacity(leaves);
        for (symbol, frequency) in freq.nonzero() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, frequency });
            heap.push(Pending {
                frequency,
                representative: symbol,
                id,
            });
        }

        let root = loop {
            let first = heap.pop()?;
            let Some(second) = heap.pop() else {
                break first.id;
            };
            // `first` precedes `second`, so it goes left and lends its representative.
            let parent = Node::Internal {
                frequency: first.frequency.saturating_add(second.frequency),
                representative: first.representative,
                left: first.id,
                right: second.id,
            };
            let id = nodes.len();
            nodes.push(parent);
            heap.push(Pending {
                frequency: parent.frequency(),
                representative: parent.representative(),
                id,
            });
        };

        debug!(leaves, nodes = nodes.len(), "built huffman tree");
        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root_node(&self) -> &Node {
        self.node(self.root)
    }

    /// Child reached by following one bit from `id`; `None` from a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match *self.node(id) {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn is_single_leaf(&self) -> bool {
        self.root_node().is_leaf()
    }

    /// Indented dump of the tree structure, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, "root", &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, label: &str, out: &mut String) {
        let indent = "  ".repeat(depth);
        match *self.node(id) {
            Node::Leaf { symbol, frequency } => {
                out.push_str(&format!("{indent}{label}-> Leaf {symbol} [freq: {frequency}]\n"));
            }
            Node::Internal {
                frequency,
                representative,
                left,
                right,
            } => {
                out.push_str(&format!(
                    "{indent}{label}-> Internal [freq: {frequency}, rep: {representative}]\n"
                ));
                self.render_node(left, depth + 1, "L", out);
                self.render_node(right, depth + 1, "R", out);
            }
        }
    }
}
