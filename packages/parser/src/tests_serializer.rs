//! Compose-path suites: emission, dedup accumulators, determinism.

use quill_codec::{encode, AddressRef, EventRef, Identifier, PubkeyRef};
use quill_model::{BlobAttachment, Block, Document, EmbedTarget, EmojiSource, Node};

use crate::serializer::{serialize, EmojiTag};
use crate::parse;

fn custom_emoji(shortcode: &str, url: &str) -> Node {
    Node::Emoji {
        shortcode: shortcode.to_string(),
        source: EmojiSource::Custom {
            image_url: url.to_string(),
        },
    }
}

#[test]
fn test_scenario_custom_emoji_in_two_blocks() {
    let document = Document::with_blocks(vec![
        Block::with_nodes(vec![
            Node::text("gm "),
            custom_emoji("pepe", "https://x/pepe.png"),
        ]),
        Block::with_nodes(vec![
            custom_emoji("pepe", "https://x/pepe.png"),
            Node::text(" gn"),
        ]),
    ]);

    let record = serialize(&document);

    assert_eq!(record.text, "gm :pepe:\n:pepe: gn");
    assert_eq!(record.text.matches(":pepe:").count(), 2);
    assert_eq!(
        record.emoji_tags,
        vec![EmojiTag {
            shortcode: "pepe".to_string(),
            url: "https://x/pepe.png".to_string(),
        }]
    );
}

#[test]
fn test_emoji_used_three_times_accumulates_once() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        custom_emoji("zap", "https://x/zap.png"),
        custom_emoji("zap", "https://x/zap.png"),
        custom_emoji("zap", "https://x/zap.png"),
    ])]);

    let record = serialize(&document);

    assert_eq!(record.emoji_tags.len(), 1);
    assert_eq!(record.text, ":zap::zap::zap:");
}

#[test]
fn test_unicode_emoji_emits_literal_character() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("gm "),
        Node::Emoji {
            shortcode: "sunrise".to_string(),
            source: EmojiSource::Unicode {
                character: "🌅".to_string(),
            },
        },
    ])]);

    let record = serialize(&document);

    assert_eq!(record.text, "gm 🌅");
    assert!(record.emoji_tags.is_empty());
}

#[test]
fn test_mention_emits_scheme_prefixed_token() {
    let target = PubkeyRef::new([5; 32]);
    let token = encode(&Identifier::Pubkey(target.clone())).unwrap();
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("hi "),
        Node::Mention {
            target,
            display_label: "alice".to_string(),
        },
    ])]);

    let record = serialize(&document);

    assert_eq!(record.text, format!("hi nostr:{token}"));
}

#[test]
fn test_blob_attachments_dedup_by_hash() {
    let blob_a = BlobAttachment::new("https://media.x.io/ab.png", "ab".repeat(32));
    let blob_a_again = BlobAttachment {
        // Same hash uploaded to a different server still counts once.
        url: "https://mirror.x.io/ab.png".to_string(),
        ..blob_a.clone()
    };
    let blob_b = BlobAttachment::new("https://media.x.io/cd.png", "cd".repeat(32));

    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::BlobAttachment(blob_a.clone()),
        Node::text(" "),
        Node::BlobAttachment(blob_a_again),
        Node::text(" "),
        Node::BlobAttachment(blob_b.clone()),
    ])]);

    let record = serialize(&document);

    assert_eq!(record.blob_attachments, vec![blob_a.clone(), blob_b]);
    assert_eq!(
        record.text,
        format!(
            "{} {} {}",
            blob_a.url, "https://mirror.x.io/ab.png", "https://media.x.io/cd.png"
        )
    );
}

#[test]
fn test_address_embed_accumulates_coordinate() {
    let address = AddressRef::new(30023, [1; 32], "intro-post");
    let token = encode(&Identifier::Address(address.clone())).unwrap();

    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("read "),
        Node::EventEmbed {
            target: EmbedTarget::Address(address.clone()),
        },
        Node::text(" and again "),
        Node::EventEmbed {
            target: EmbedTarget::Address(address.clone()),
        },
    ])]);

    let record = serialize(&document);

    assert_eq!(record.address_refs, vec![address]);
    assert_eq!(record.text.matches(&format!("nostr:{token}")).count(), 2);
}

#[test]
fn test_event_embed_has_no_address_accumulation() {
    let event = EventRef::new([2; 32]);
    let document = Document::with_blocks(vec![Block::with_nodes(vec![Node::EventEmbed {
        target: EmbedTarget::Event(event),
    }])]);

    let record = serialize(&document);

    assert!(record.address_refs.is_empty());
    assert!(record.text.starts_with("nostr:note1"));
}

#[test]
fn test_blocks_join_with_single_newline_and_trim_once() {
    let document = Document::with_blocks(vec![
        Block::with_nodes(vec![Node::text("  hello ")]),
        Block::with_nodes(vec![Node::text("world  ")]),
    ]);

    let record = serialize(&document);

    // Inner whitespace survives; only the outermost edges are trimmed.
    assert_eq!(record.text, "hello \nworld");
}

#[test]
fn test_empty_document_serializes_to_empty_text() {
    let record = serialize(&Document::new());
    assert_eq!(record.text, "");
    assert!(record.emoji_tags.is_empty());
    assert!(record.blob_attachments.is_empty());
    assert!(record.address_refs.is_empty());
}

#[test]
fn test_serialization_is_deterministic() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::Hashtag {
            tag: "art".to_string(),
        },
        Node::text(" "),
        custom_emoji("pepe", "https://x/pepe.png"),
        Node::Gallery {
            links: vec![
                "https://x.io/a.png".to_string(),
                "https://x.io/b.png".to_string(),
            ],
        },
    ])]);

    assert_eq!(serialize(&document), serialize(&document));
}

#[test]
fn test_gallery_links_join_with_spaces() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![Node::Gallery {
        links: vec![
            "https://x.io/a.png".to_string(),
            "https://x.io/b.png".to_string(),
        ],
    }])]);

    let record = serialize(&document);

    assert_eq!(record.text, "https://x.io/a.png https://x.io/b.png");
}

#[test]
fn test_doc_ref_is_zero_padded() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("see "),
        Node::ProtocolDocRef { number: 5 },
    ])]);

    assert_eq!(serialize(&document).text, "see NIP-05");
}

#[test]
fn test_serialized_record_is_json_ready() {
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("hi "),
        custom_emoji("pepe", "https://x/pepe.png"),
    ])]);

    let record = serialize(&document);
    let json = serde_json::to_string(&record).unwrap();

    assert!(json.contains("\"emoji_tags\""));
    let back: crate::SerializedRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_serialized_embed_parses_back_to_equal_target() {
    let event = EventRef::with_relays([3; 32], vec!["wss://relay.x.io".to_string()]);
    let document = Document::with_blocks(vec![Block::with_nodes(vec![
        Node::text("q: "),
        Node::EventEmbed {
            target: EmbedTarget::Event(event.clone()),
        },
    ])]);

    let record = serialize(&document);
    let nodes = parse(&record.text, &[]);

    assert_eq!(
        nodes,
        vec![
            Node::text("q: "),
            Node::EventEmbed {
                target: EmbedTarget::Event(event)
            },
        ]
    );
}
