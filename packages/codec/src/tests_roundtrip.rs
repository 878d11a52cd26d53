//! Property suites: every well-formed identifier survives encode → decode.

use proptest::prelude::*;

use crate::{decode, encode, AddressRef, EventRef, Id32, Identifier, PubkeyRef};

fn id32() -> impl Strategy<Value = Id32> {
    proptest::array::uniform32(any::<u8>())
}

fn relay_hints() -> impl Strategy<Value = Vec<String>> {
    // Relay hints are short URL-ish strings; TLV values cap at 255 bytes.
    proptest::collection::vec("[a-z0-9./:-]{1,40}", 0..4)
}

proptest! {
    #[test]
    fn prop_pubkey_round_trip(pubkey in id32(), relays in relay_hints()) {
        let identifier = Identifier::Pubkey(PubkeyRef::with_relays(pubkey, relays));
        let token = encode(&identifier).unwrap();
        prop_assert_eq!(decode(&token).unwrap(), identifier);
    }

    #[test]
    fn prop_event_round_trip(id in id32(), relays in relay_hints()) {
        let identifier = Identifier::Event(EventRef::with_relays(id, relays));
        let token = encode(&identifier).unwrap();
        prop_assert_eq!(decode(&token).unwrap(), identifier);
    }

    #[test]
    fn prop_address_round_trip(
        kind in any::<u32>(),
        pubkey in id32(),
        identifier in "[\\PC]{0,40}",
        relays in relay_hints(),
    ) {
        let identifier =
            Identifier::Address(AddressRef::with_relays(kind, pubkey, identifier, relays));
        let token = encode(&identifier).unwrap();
        prop_assert_eq!(decode(&token).unwrap(), identifier);
    }

    #[test]
    fn prop_decode_never_panics(input in ".{0,120}") {
        // Arbitrary garbage must produce a recoverable error, not a panic.
        let _ = decode(&input);
    }

    #[test]
    fn prop_tokens_are_scheme_safe(id in id32()) {
        let identifier = Identifier::Event(EventRef::new(id));
        let token = encode(&identifier).unwrap();
        let uri = format!("nostr:{token}");
        prop_assert_eq!(decode(&uri).unwrap(), identifier);
    }
}
