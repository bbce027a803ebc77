use tracing::debug;

use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Bit-string code per symbol; empty for symbols that do not occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<String>,
}

impl CodeTable {
    /// Walks the tree, appending '0' on left descents and '1' on right descents.
    ///
    /// A tree that is a single leaf gives its symbol the one-bit code `"0"`.
    pub fn generate(tree: Option<&HuffmanTree>) -> Self {
        let mut codes = vec![String::new(); ALPHABET_SIZE];
        if let Some(tree) = tree {
            if tree.is_single_leaf() {
                codes[tree.root_node().representative() as usize] = "0".to_string();
            } else {
                collect_codes(tree, tree.root(), String::new(), &mut codes);
            }
            debug!(
                assigned = codes.iter().filter(|c| !c.is_empty()).count(),
                longest = codes.iter().map(String::len).max().unwrap_or(0),
                "generated code table"
            );
        }
        Self { codes }
    }

    pub fn from_frequencies(freq: &FrequencyTable) -> Self {
        Self::generate(HuffmanTree::build(freq).as_ref())
    }

    /// Code for `symbol`, or `None` if the symbol has no leaf.
    pub fn get(&self, symbol: u8) -> Option<&str> {
        let code = &self.codes[symbol as usize];
        (!code.is_empty()).then_some(code.as_str())
    }

    /// Assigned `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, code)| !code.is_empty())
            .map(|(symbol, code)| (symbol as u8, code.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(String::is_empty)
    }

    /// Length in bits of the bitstream produced for data with these frequencies.
    pub fn encoded_len(&self, freq: &FrequencyTable) -> u64 {
        freq.nonzero()
            .map(|(symbol, count)| count.saturating_mul(self.codes[symbol as usize].len() as u64))
            .fold(0, u64::saturating_add)
    }
}

fn collect_codes(tree: &HuffmanTree, id: NodeId, prefix: String, codes: &mut [String]) {
    match *tree.node(id) {
        Node::Leaf { symbol, .. } => codes[symbol as usize] = prefix,
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            collect_codes(tree, left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push('1');
            collect_codes(tree, right, right_prefix, codes);
        }
    }
}
