//! Intent-preserving document mutations.
//!
//! Mutation semantics:
//!
//! - `InsertNodes` — splice a run of nodes at a node boundary
//! - `InsertText` — insert text, merging into an adjacent text node when
//!   one is already at the insertion point
//! - `SplitBlock` — split one block in two at a node boundary
//! - `RemoveNode` — remove a single node
//!
//! Every mutation validates its coordinates against the current document
//! before touching it; a failed validation leaves the document unchanged.

use quill_model::{Block, Document, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic operations on an edit-session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Splice nodes into a block at a node index.
    InsertNodes {
        block: usize,
        index: usize,
        nodes: Vec<Node>,
    },

    /// Insert text at a node index, merging with a text node already there.
    InsertText {
        block: usize,
        index: usize,
        text: String,
    },

    /// Split a block in two; nodes from `index` onward move to the new block.
    SplitBlock { block: usize, index: usize },

    /// Remove one node.
    RemoveNode { block: usize, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("block out of range: {0}")]
    BlockOutOfRange(usize),

    #[error("index {index} out of range in block {block}")]
    IndexOutOfRange { block: usize, index: usize },
}

impl Mutation {
    /// Validate coordinates against the document without applying.
    pub fn validate(&self, document: &Document) -> Result<(), MutationError> {
        let (block, index, removing) = match self {
            Mutation::InsertNodes { block, index, .. }
            | Mutation::InsertText { block, index, .. }
            | Mutation::SplitBlock { block, index } => (*block, *index, false),
            Mutation::RemoveNode { block, index } => (*block, *index, true),
        };

        let nodes = &document
            .blocks
            .get(block)
            .ok_or(MutationError::BlockOutOfRange(block))?
            .nodes;

        // Insertion points range over 0..=len, removal targets over 0..len.
        let limit = if removing {
            nodes.len().saturating_sub(1)
        } else {
            nodes.len()
        };
        if index > limit || (removing && nodes.is_empty()) {
            return Err(MutationError::IndexOutOfRange { block, index });
        }
        Ok(())
    }

    /// Validate, then apply to the document.
    pub fn apply(&self, document: &mut Document) -> Result<(), MutationError> {
        self.validate(document)?;

        match self {
            Mutation::InsertNodes {
                block,
                index,
                nodes,
            } => {
                let target = &mut document.blocks[*block].nodes;
                target.splice(*index..*index, nodes.iter().cloned());
            }

            Mutation::InsertText { block, index, text } => {
                let target = &mut document.blocks[*block].nodes;
                // Merge into the text node just before the insertion point,
                // so typing does not fragment into one node per keystroke.
                if *index > 0 {
                    if let Some(Node::Text { value }) = target.get_mut(*index - 1) {
                        value.push_str(text);
                        return Ok(());
                    }
                }
                target.insert(*index, Node::text(text.clone()));
            }

            Mutation::SplitBlock { block, index } => {
                let tail = document.blocks[*block].nodes.split_off(*index);
                document.blocks.insert(*block + 1, Block::with_nodes(tail));
            }

            Mutation::RemoveNode { block, index } => {
                document.blocks[*block].nodes.remove(*index);
            }
        }
        Ok(())
    }
}
