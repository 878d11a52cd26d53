//! Pipeline driver for the display path.

use quill_model::{Node, Span, Spanned, Tag};

use crate::media::is_media_url;
use crate::passes::{default_pipeline, ParseContext, TransformPass};

/// Working state of the pipeline: each segment is either still open to later
/// passes or already claimed by an earlier one.
enum Segment {
    Open(Span),
    Claimed(Spanned<Node>),
}

/// Parse record content into its node sequence using the default pipeline.
///
/// Pure in `(content, tags)`; the caller is expected to have trimmed the
/// content. Empty input yields an empty sequence.
pub fn parse(content: &str, tags: &[Tag]) -> Vec<Node> {
    parse_spanned(content, tags)
        .into_iter()
        .map(|spanned| spanned.value)
        .collect()
}

/// [`parse`] with a caller-supplied pipeline.
pub fn parse_with(content: &str, tags: &[Tag], passes: &[Box<dyn TransformPass>]) -> Vec<Node> {
    parse_spanned_with(content, tags, passes)
        .into_iter()
        .map(|spanned| spanned.value)
        .collect()
}

/// Span-carrying variant of [`parse`]. Spans partition the input: sorted,
/// gap-free, starting at 0 and ending at `content.len()`.
pub fn parse_spanned(content: &str, tags: &[Tag]) -> Vec<Spanned<Node>> {
    parse_spanned_with(content, tags, &default_pipeline())
}

/// Span-carrying variant of [`parse_with`].
pub fn parse_spanned_with(
    content: &str,
    tags: &[Tag],
    passes: &[Box<dyn TransformPass>],
) -> Vec<Spanned<Node>> {
    if content.is_empty() {
        return Vec::new();
    }

    let ctx = ParseContext { tags };
    let mut segments = vec![Segment::Open(Span::new(0, content.len()))];

    for pass in passes {
        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Claimed(done) => next.push(Segment::Claimed(done)),
                Segment::Open(span) => {
                    let region = &content[span.start..span.end];
                    let mut cursor = span.start;
                    for found in pass.scan(region, &ctx) {
                        let start = span.start + found.range.start;
                        let end = span.start + found.range.end;
                        debug_assert!(cursor <= start && end <= span.end);
                        if start > cursor {
                            next.push(Segment::Open(Span::new(cursor, start)));
                        }
                        next.push(Segment::Claimed(Spanned::new(
                            found.node,
                            Span::new(start, end),
                        )));
                        cursor = end;
                    }
                    if cursor < span.end {
                        next.push(Segment::Open(Span::new(cursor, span.end)));
                    }
                }
            }
        }
        segments = next;
        tracing::trace!(pass = pass.name(), segments = segments.len(), "pass applied");
    }

    let nodes = segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Claimed(done) => done,
            Segment::Open(span) => {
                Spanned::new(Node::text(&content[span.start..span.end]), span)
            }
        })
        .collect();

    consolidate_galleries(nodes)
}

/// Merge maximal runs of media links, separated only by whitespace text, into
/// a single gallery node. Whitespace between two members is absorbed into the
/// gallery's span; whitespace after the last member stays literal text.
fn consolidate_galleries(nodes: Vec<Spanned<Node>>) -> Vec<Spanned<Node>> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut links: Vec<String> = Vec::new();
    let mut run_span: Option<Span> = None;
    let mut gap: Vec<Spanned<Node>> = Vec::new();

    for spanned in nodes {
        match spanned {
            Spanned {
                value: Node::Link { href },
                span,
            } if is_media_url(&href) => {
                run_span = Some(run_span.map_or(span, |existing: Span| existing.join(span)));
                gap.clear();
                links.push(href);
            }
            other if !links.is_empty() && gap.is_empty() && other.value.is_whitespace_text() => {
                // Might sit between two members; decided by the next node.
                gap.push(other);
            }
            other => {
                flush_gallery(&mut out, &mut links, &mut run_span, &mut gap);
                out.push(other);
            }
        }
    }
    flush_gallery(&mut out, &mut links, &mut run_span, &mut gap);
    out
}

fn flush_gallery(
    out: &mut Vec<Spanned<Node>>,
    links: &mut Vec<String>,
    run_span: &mut Option<Span>,
    gap: &mut Vec<Spanned<Node>>,
) {
    if let Some(span) = run_span.take() {
        if !links.is_empty() {
            out.push(Spanned::new(
                Node::Gallery {
                    links: std::mem::take(links),
                },
                span,
            ));
        }
    }
    out.append(gap);
}
