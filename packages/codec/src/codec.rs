//! Bech32 token encoding and decoding.
//!
//! Token grammar: a human-readable prefix naming the identifier kind, the
//! separator `1`, then the checksummed payload. Bare 32-byte forms (`npub`,
//! `note`) carry the raw id; hinted and addressable forms (`nprofile`,
//! `nevent`, `naddr`) carry a TLV payload.

use bech32::{Bech32, Hrp};

use crate::entity::{AddressRef, EventRef, Id32, Identifier, PubkeyRef};
use crate::error::{DecodeError, DecodeResult, EncodeError};

const HRP_PUBKEY: &str = "npub";
const HRP_PROFILE: &str = "nprofile";
const HRP_EVENT_ID: &str = "note";
const HRP_EVENT: &str = "nevent";
const HRP_ADDRESS: &str = "naddr";

/// URI scheme used when identifiers are inlined in record content.
pub const URI_SCHEME: &str = "nostr:";

/// Regex source matching a candidate identifier token, optionally
/// scheme-prefixed. Shared by the content parser and the paste resolver so
/// both surfaces agree on what a token looks like; boundary requirements are
/// the caller's concern.
pub const TOKEN_PATTERN: &str =
    r"(?:nostr:)?(?:npub|nprofile|note|nevent|naddr)1[qpzry9x8gf2tvdw0s3jn54khce6mua7l]+";

/// TLV entry types used by the hinted token forms.
mod tlv_type {
    pub const SPECIAL: u8 = 0;
    pub const RELAY: u8 = 1;
    pub const AUTHOR: u8 = 2;
    pub const KIND: u8 = 3;
}

/// Encode an identifier into its canonical compact token.
///
/// A `PubkeyRef`/`EventRef` without relay hints takes the short bare form;
/// with hints it takes the longer TLV form. Both decode back to the original
/// value.
pub fn encode(identifier: &Identifier) -> Result<String, EncodeError> {
    match identifier {
        Identifier::Pubkey(p) if p.relay_hints.is_empty() => encode_payload(HRP_PUBKEY, &p.pubkey),
        Identifier::Pubkey(p) => {
            let mut payload = Vec::new();
            push_tlv(&mut payload, tlv_type::SPECIAL, &p.pubkey)?;
            for relay in &p.relay_hints {
                push_tlv(&mut payload, tlv_type::RELAY, relay.as_bytes())?;
            }
            encode_payload(HRP_PROFILE, &payload)
        }
        Identifier::Event(e) if e.relay_hints.is_empty() => encode_payload(HRP_EVENT_ID, &e.id),
        Identifier::Event(e) => {
            let mut payload = Vec::new();
            push_tlv(&mut payload, tlv_type::SPECIAL, &e.id)?;
            for relay in &e.relay_hints {
                push_tlv(&mut payload, tlv_type::RELAY, relay.as_bytes())?;
            }
            encode_payload(HRP_EVENT, &payload)
        }
        Identifier::Address(a) => {
            let mut payload = Vec::new();
            push_tlv(&mut payload, tlv_type::SPECIAL, a.identifier.as_bytes())?;
            for relay in &a.relay_hints {
                push_tlv(&mut payload, tlv_type::RELAY, relay.as_bytes())?;
            }
            push_tlv(&mut payload, tlv_type::AUTHOR, &a.pubkey)?;
            push_tlv(&mut payload, tlv_type::KIND, &a.kind.to_be_bytes())?;
            encode_payload(HRP_ADDRESS, &payload)
        }
    }
}

/// Decode a token (with or without the `nostr:` scheme) into an identifier.
pub fn decode(token: &str) -> DecodeResult<Identifier> {
    let token = strip_scheme(token);
    let (hrp, payload) =
        bech32::decode(token).map_err(|e| DecodeError::malformed(e.to_string()))?;

    match hrp.as_str().to_ascii_lowercase().as_str() {
        HRP_PUBKEY => Ok(Identifier::Pubkey(PubkeyRef::new(expect_id32(&payload)?))),
        HRP_EVENT_ID => Ok(Identifier::Event(EventRef::new(expect_id32(&payload)?))),
        HRP_PROFILE => {
            let entries = parse_tlv(&payload)?;
            let pubkey = required_id32(&entries, tlv_type::SPECIAL, "pubkey")?;
            Ok(Identifier::Pubkey(PubkeyRef::with_relays(
                pubkey,
                relay_hints(&entries)?,
            )))
        }
        HRP_EVENT => {
            let entries = parse_tlv(&payload)?;
            let id = required_id32(&entries, tlv_type::SPECIAL, "event id")?;
            Ok(Identifier::Event(EventRef::with_relays(
                id,
                relay_hints(&entries)?,
            )))
        }
        HRP_ADDRESS => {
            let entries = parse_tlv(&payload)?;
            let identifier = entries
                .iter()
                .find(|e| e.entry_type == tlv_type::SPECIAL)
                .ok_or(DecodeError::MissingTlv("identifier"))
                .and_then(|e| {
                    String::from_utf8(e.value.to_vec())
                        .map_err(|_| DecodeError::InvalidIdentifier)
                })?;
            let pubkey = required_id32(&entries, tlv_type::AUTHOR, "author")?;
            let kind = required_kind(&entries)?;
            Ok(Identifier::Address(AddressRef::with_relays(
                kind,
                pubkey,
                identifier,
                relay_hints(&entries)?,
            )))
        }
        other => Err(DecodeError::unknown_prefix(other)),
    }
}

/// Remove the `nostr:` URI scheme from a token, if present.
pub fn strip_scheme(token: &str) -> &str {
    token.strip_prefix(URI_SCHEME).unwrap_or(token)
}

/// Short display form of an encoded token, e.g. `npub1sn0wdnk…njq4`.
pub fn abbrev(token: &str) -> String {
    if token.chars().count() <= 16 {
        return token.to_string();
    }
    // Tokens are ASCII, so byte slicing at these offsets is safe.
    format!("{}…{}", &token[..10], &token[token.len() - 4..])
}

/// Truncated placeholder label for a public key with no cached profile name.
///
/// Always derived from the bare (hint-free) form so the same key yields the
/// same label regardless of which relays a particular reference carried.
pub fn placeholder_label(pubkey: &Id32) -> String {
    match encode(&Identifier::Pubkey(PubkeyRef::new(*pubkey))) {
        Ok(token) => abbrev(&token),
        Err(_) => abbrev(&hex::encode(pubkey)),
    }
}

fn encode_payload(prefix: &str, payload: &[u8]) -> Result<String, EncodeError> {
    let hrp = Hrp::parse(prefix).map_err(|e| EncodeError::Bech32(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, payload).map_err(|e| EncodeError::Bech32(e.to_string()))
}

fn push_tlv(buf: &mut Vec<u8>, entry_type: u8, value: &[u8]) -> Result<(), EncodeError> {
    if value.len() > u8::MAX as usize {
        return Err(EncodeError::OversizeTlv(value.len()));
    }
    buf.push(entry_type);
    buf.push(value.len() as u8);
    buf.extend_from_slice(value);
    Ok(())
}

struct TlvEntry<'a> {
    entry_type: u8,
    value: &'a [u8],
}

fn parse_tlv(payload: &[u8]) -> DecodeResult<Vec<TlvEntry<'_>>> {
    let mut entries = Vec::new();
    let mut at = 0;
    while at < payload.len() {
        if at + 2 > payload.len() {
            return Err(DecodeError::TruncatedTlv(at));
        }
        let entry_type = payload[at];
        let len = payload[at + 1] as usize;
        let start = at + 2;
        let end = start + len;
        if end > payload.len() {
            return Err(DecodeError::TruncatedTlv(at));
        }
        entries.push(TlvEntry {
            entry_type,
            value: &payload[start..end],
        });
        at = end;
    }
    // Unknown entry types are carried through and ignored by the lookups
    // below, so tokens from newer peers still decode.
    Ok(entries)
}

fn relay_hints(entries: &[TlvEntry<'_>]) -> DecodeResult<Vec<String>> {
    entries
        .iter()
        .filter(|e| e.entry_type == tlv_type::RELAY)
        .map(|e| String::from_utf8(e.value.to_vec()).map_err(|_| DecodeError::InvalidRelay))
        .collect()
}

fn required_id32(entries: &[TlvEntry<'_>], entry_type: u8, name: &'static str) -> DecodeResult<Id32> {
    let entry = entries
        .iter()
        .find(|e| e.entry_type == entry_type)
        .ok_or(DecodeError::MissingTlv(name))?;
    expect_id32(entry.value)
}

fn required_kind(entries: &[TlvEntry<'_>]) -> DecodeResult<u32> {
    let entry = entries
        .iter()
        .find(|e| e.entry_type == tlv_type::KIND)
        .ok_or(DecodeError::MissingTlv("kind"))?;
    let bytes: [u8; 4] = entry
        .value
        .try_into()
        .map_err(|_| DecodeError::InvalidTlvLength {
            entry: "kind",
            found: entry.value.len(),
        })?;
    Ok(u32::from_be_bytes(bytes))
}

fn expect_id32(bytes: &[u8]) -> DecodeResult<Id32> {
    bytes.try_into().map_err(|_| DecodeError::InvalidLength {
        expected: 32,
        found: bytes.len(),
    })
}
