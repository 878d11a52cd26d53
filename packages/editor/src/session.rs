//! Edit session: one client's in-progress compose state.

use quill_model::{Document, Node};

use crate::mutations::{Mutation, MutationError};
use crate::paste::{resolve_paste, DisplayNameCache};

/// Insertion point: a node boundary within a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub block: usize,
    pub node: usize,
}

/// Tracks the document being composed, the cursor, and a version counter
/// that increments on every applied mutation.
///
/// The session owns nothing beyond the compose state: once the document is
/// serialized and handed to the transport side, the session is discarded.
pub struct EditSession {
    document: Document,
    cursor: Cursor,
    version: u64,
}

impl EditSession {
    /// Fresh session over an empty document, cursor at the start.
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            cursor: Cursor::default(),
            version: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a validated mutation; the version bumps only on success.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        mutation.apply(&mut self.document)?;
        self.version += 1;
        Ok(())
    }

    /// Insert plain text at the cursor.
    pub fn insert_text(&mut self, text: impl Into<String>) -> Result<(), MutationError> {
        let text = text.into();
        let had_node_before = self.cursor.node > 0
            && matches!(
                self.document
                    .blocks
                    .get(self.cursor.block)
                    .and_then(|block| block.nodes.get(self.cursor.node - 1)),
                Some(Node::Text { .. })
            );
        self.apply(Mutation::InsertText {
            block: self.cursor.block,
            index: self.cursor.node,
            text,
        })?;
        // Merged inserts extend the preceding node instead of adding one.
        if !had_node_before {
            self.cursor.node += 1;
        }
        Ok(())
    }

    /// Open a new block at the cursor and move into it.
    pub fn break_block(&mut self) -> Result<(), MutationError> {
        self.apply(Mutation::SplitBlock {
            block: self.cursor.block,
            index: self.cursor.node,
        })?;
        self.cursor = Cursor {
            block: self.cursor.block + 1,
            node: 0,
        };
        Ok(())
    }

    /// Resolve a clipboard payload and splice the result at the cursor.
    ///
    /// Returns `false` when the resolver reports no match; the document is
    /// untouched and the caller should fall back to default paste handling.
    pub fn paste(&mut self, clipboard: &str, names: &dyn DisplayNameCache) -> bool {
        let Some(nodes) = resolve_paste(clipboard, names) else {
            return false;
        };
        let inserted = nodes.len();
        let applied = self.apply(Mutation::InsertNodes {
            block: self.cursor.block,
            index: self.cursor.node,
            nodes,
        });
        match applied {
            Ok(()) => {
                // Cursor lands after everything just spliced.
                self.cursor.node += inserted;
                tracing::debug!(inserted, "paste resolved into typed nodes");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "paste splice rejected");
                false
            }
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
