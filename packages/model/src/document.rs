//! Editor-side structured document.

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// A paragraph-level grouping of nodes in an edit session. Blocks serialize
/// joined by single newlines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Ordered blocks of ordered nodes: the in-progress compose state.
///
/// Created empty when an editor mounts, mutated by typing and by the paste
/// resolver, then serialized once and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Fresh document with a single empty block, the state an editor mounts
    /// with.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new()],
        }
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// True when no block holds any node.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
