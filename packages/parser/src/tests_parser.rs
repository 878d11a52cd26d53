//! Display-path suites: pipeline priority, boundaries, galleries, coverage.

use quill_codec::{encode, placeholder_label, EventRef, Identifier, PubkeyRef};
use quill_model::{EmbedTarget, EmojiSource, Node, Tag};

use crate::{parse, parse_spanned};

fn pubkey_token(byte: u8) -> (PubkeyRef, String) {
    let target = PubkeyRef::new([byte; 32]);
    let token = encode(&Identifier::Pubkey(target.clone())).unwrap();
    (target, token)
}

/// Spans produced by a parse must partition the input exactly.
fn assert_partition(content: &str) {
    let spanned = parse_spanned(content, &[]);
    let mut cursor = 0;
    for node in &spanned {
        assert_eq!(
            node.span.start, cursor,
            "gap or overlap at byte {cursor} in {content:?}"
        );
        assert!(node.span.end > node.span.start, "empty span in {content:?}");
        cursor = node.span.end;
    }
    assert_eq!(cursor, content.len(), "dangling tail in {content:?}");
}

#[test]
fn test_scenario_hashtag_then_mention() {
    let (target, token) = pubkey_token(7);
    let content = format!("hello #nostr check nostr:{token}");

    let nodes = parse(&content, &[]);

    assert_eq!(
        nodes,
        vec![
            Node::text("hello "),
            Node::Hashtag {
                tag: "nostr".to_string()
            },
            Node::text(" check "),
            Node::Mention {
                display_label: placeholder_label(&target.pubkey),
                target,
            },
        ]
    );
}

#[test]
fn test_empty_input_yields_empty_sequence() {
    assert_eq!(parse("", &[]), Vec::<Node>::new());
}

#[test]
fn test_plain_text_is_one_node() {
    let nodes = parse("just words, nothing else.", &[]);
    assert_eq!(nodes, vec![Node::text("just words, nothing else.")]);
}

#[test]
fn test_undecodable_token_stays_text() {
    // Right prefix and charset, wrong payload: decode fails, parse survives.
    let nodes = parse("see npub1qqqqqqqq for details", &[]);
    assert_eq!(nodes, vec![Node::text("see npub1qqqqqqqq for details")]);
}

#[test]
fn test_event_token_becomes_embed() {
    let event = EventRef::new([9; 32]);
    let token = encode(&Identifier::Event(event.clone())).unwrap();
    let content = format!("quoting nostr:{token} here");

    let nodes = parse(&content, &[]);

    assert_eq!(
        nodes,
        vec![
            Node::text("quoting "),
            Node::EventEmbed {
                target: EmbedTarget::Event(event)
            },
            Node::text(" here"),
        ]
    );
}

#[test]
fn test_identifier_pass_outranks_url_pass() {
    // A token inside a URL path belongs to the link, not the entity pass.
    let (_, token) = pubkey_token(3);
    let content = format!("checkout https://x.io/abc{token} path");

    let nodes = parse(&content, &[]);

    assert_eq!(
        nodes,
        vec![
            Node::text("checkout "),
            Node::Link {
                href: format!("https://x.io/abc{token}")
            },
            Node::text(" path"),
        ]
    );
}

#[test]
fn test_media_run_consolidates_into_gallery() {
    let content = "https://files.x.io/a.png https://files.x.io/b.mp4";
    let nodes = parse(content, &[]);

    assert_eq!(
        nodes,
        vec![Node::Gallery {
            links: vec![
                "https://files.x.io/a.png".to_string(),
                "https://files.x.io/b.mp4".to_string(),
            ]
        }]
    );
}

#[test]
fn test_single_media_link_becomes_gallery() {
    let nodes = parse("look https://files.x.io/a.png done", &[]);

    assert_eq!(
        nodes,
        vec![
            Node::text("look "),
            Node::Gallery {
                links: vec!["https://files.x.io/a.png".to_string()]
            },
            Node::text(" done"),
        ]
    );
}

#[test]
fn test_non_media_link_is_never_gallery() {
    let nodes = parse("https://example.com/article", &[]);
    assert_eq!(
        nodes,
        vec![Node::Link {
            href: "https://example.com/article".to_string()
        }]
    );
}

#[test]
fn test_non_media_link_breaks_a_run() {
    let content = "https://x.io/a.png https://example.com/post https://x.io/b.png";
    let nodes = parse(content, &[]);

    assert_eq!(
        nodes,
        vec![
            Node::Gallery {
                links: vec!["https://x.io/a.png".to_string()]
            },
            Node::text(" "),
            Node::Link {
                href: "https://example.com/post".to_string()
            },
            Node::text(" "),
            Node::Gallery {
                links: vec!["https://x.io/b.png".to_string()]
            },
        ]
    );
}

#[test]
fn test_emoji_shortcode_resolves_only_with_tag() {
    let tags = vec![Tag(vec![
        "emoji".to_string(),
        "pepe".to_string(),
        "https://x/pepe.png".to_string(),
    ])];

    let nodes = parse("gm :pepe: :wave:", &tags);

    assert_eq!(
        nodes,
        vec![
            Node::text("gm "),
            Node::Emoji {
                shortcode: "pepe".to_string(),
                source: EmojiSource::Custom {
                    image_url: "https://x/pepe.png".to_string()
                },
            },
            Node::text(" :wave:"),
        ]
    );
}

#[test]
fn test_doc_reference() {
    let nodes = parse("addressing is NIP-19 territory", &[]);
    assert_eq!(
        nodes,
        vec![
            Node::text("addressing is "),
            Node::ProtocolDocRef { number: 19 },
            Node::text(" territory"),
        ]
    );
}

#[test]
fn test_parse_is_pure() {
    let (_, token) = pubkey_token(5);
    let content = format!("#tag {token} https://x.io/a.png text");
    assert_eq!(parse(&content, &[]), parse(&content, &[]));
}

#[test]
fn test_spans_partition_various_inputs() {
    let (_, token) = pubkey_token(11);
    let samples = [
        "".to_string(),
        "plain".to_string(),
        "multi\nline #tag text".to_string(),
        format!("nostr:{token}"),
        format!("a {token} b"),
        "https://x.io/a.png https://x.io/b.png trailing".to_string(),
        "#a #b #c".to_string(),
        "see NIP-01, NIP-02".to_string(),
        "https://example.com/article?q=1#frag".to_string(),
    ];
    for sample in &samples {
        assert_partition(sample);
    }
}

#[test]
fn test_gallery_span_covers_absorbed_whitespace() {
    let content = "https://x.io/a.png https://x.io/b.png end";
    let spanned = parse_spanned(content, &[]);

    assert!(matches!(spanned[0].value, Node::Gallery { .. }));
    assert_eq!(spanned[0].span.start, 0);
    assert_eq!(spanned[0].span.end, "https://x.io/a.png https://x.io/b.png".len());
    assert_eq!(spanned[1].value, Node::text(" end"));
}
