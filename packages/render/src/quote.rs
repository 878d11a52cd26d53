//! Quote view state machine.

use futures_util::StreamExt;

use quill_codec::{placeholder_label, Identifier};
use quill_model::{EmbedTarget, Node, Record};
use quill_parser::parse;

use crate::lookup::{RecordLookup, RecordStream};

/// Nesting depth at which embedded records stop auto-expanding.
pub const MAX_QUOTE_DEPTH: u32 = 2;

/// Maximum content characters shown in a collapsed summary.
const SUMMARY_CHARS: usize = 100;

/// Render state of one embedded-record reference.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteState {
    /// Not resolved yet. Rendered as a fixed-size placeholder (no layout
    /// shift), possibly forever — resolution has no existence guarantee.
    Pending,

    /// Resolved and parsed inline.
    Expanded { nodes: Vec<Node> },

    /// Depth cutoff reached: one-line summary behind a manual toggle.
    Collapsed { summary: String },
}

/// One embedded-record reference at a known nesting depth.
///
/// The root render call uses depth 0; every embed discovered inside an
/// expanded quote is constructed with [`QuoteView::child_depth`], which is
/// how the cutoff propagates without any global recursion guard.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteView {
    target: Identifier,
    depth: u32,
    expanded_override: bool,
    record: Option<Record>,
    state: QuoteState,
}

impl QuoteView {
    pub fn new(target: Identifier, depth: u32) -> Self {
        Self {
            target,
            depth,
            expanded_override: false,
            record: None,
            state: QuoteState::Pending,
        }
    }

    pub fn target(&self) -> &Identifier {
        &self.target
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    /// Depth handed to any embed discovered inside this view. The manual
    /// toggle does not reset it — an override never propagates past one
    /// level.
    pub fn child_depth(&self) -> u32 {
        self.depth + 1
    }

    /// Apply a resolution from the lookup collaborator. Later records
    /// supersede earlier ones; the view re-renders without re-running any
    /// outer parse.
    pub fn on_record(&mut self, record: Record) {
        self.record = Some(record);
        self.rebuild();
    }

    /// Flip the manual expand/collapse override for this view only.
    pub fn toggle(&mut self) {
        self.expanded_override = !self.expanded_override;
        self.rebuild();
    }

    fn should_expand(&self) -> bool {
        self.depth < MAX_QUOTE_DEPTH || self.expanded_override
    }

    fn rebuild(&mut self) {
        let Some(record) = &self.record else {
            self.state = QuoteState::Pending;
            return;
        };
        self.state = if self.should_expand() {
            QuoteState::Expanded {
                nodes: parse(record.content.trim(), &record.tags),
            }
        } else {
            QuoteState::Collapsed {
                summary: summarize(record),
            }
        };
    }
}

/// Embed targets discovered in a parsed node sequence, in render order.
/// Each becomes a child [`QuoteView`] at `child_depth`.
pub fn embedded_targets(nodes: &[Node]) -> Vec<Identifier> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::EventEmbed { target } => Some(target.as_identifier()),
            _ => None,
        })
        .collect()
}

/// One-line collapsed form: abbreviated author plus the leading content,
/// ellipsized at a character boundary.
fn summarize(record: &Record) -> String {
    let author = match record.author_key() {
        Some(key) => placeholder_label(&key),
        None => placeholder_label(&[0; 32]),
    };
    let body = record.content.trim();
    let mut indices = body.char_indices();
    let clipped = match indices.nth(SUMMARY_CHARS) {
        Some((at, _)) => format!("{}…", &body[..at]),
        None => body.to_string(),
    };
    format!("{author}: {clipped}")
}

/// A [`QuoteView`] paired with its lookup subscription.
///
/// Dropping the subscription drops the stream, which is the unsubscribe —
/// there is no in-flight computation to abort.
pub struct QuoteSubscription {
    view: QuoteView,
    stream: RecordStream,
}

impl QuoteSubscription {
    /// Subscribe for a target discovered at `depth`.
    pub fn subscribe<L: RecordLookup + ?Sized>(lookup: &L, target: Identifier, depth: u32) -> Self {
        let stream = lookup.resolve(&target);
        tracing::debug!(depth, "quote lookup subscribed");
        Self {
            view: QuoteView::new(target, depth),
            stream,
        }
    }

    /// Subscribe for an embed node's target.
    pub fn for_embed<L: RecordLookup + ?Sized>(
        lookup: &L,
        target: &EmbedTarget,
        depth: u32,
    ) -> Self {
        Self::subscribe(lookup, target.as_identifier(), depth)
    }

    pub fn view(&self) -> &QuoteView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut QuoteView {
        &mut self.view
    }

    /// Wait for the next resolution and apply it to the view.
    ///
    /// `None` means the lookup closed its stream; the view keeps its last
    /// state (a never-resolved quote stays `Pending` indefinitely).
    pub async fn next_update(&mut self) -> Option<&QuoteState> {
        let record = self.stream.next().await?;
        self.view.on_record(record);
        Some(self.view.state())
    }
}
