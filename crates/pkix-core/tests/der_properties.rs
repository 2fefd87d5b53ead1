//! # DER Property Tests
//!
//! Properties of the framing layer that the master list round trip and the
//! proof-of-possession signature path rely on:
//!
//! - Re-encoding a parsed value reproduces the input exactly.
//! - Integer encodings are minimal and decode to the same value.
//! - SET OF output does not depend on member order.

use pkix_core::{Any, Decode, Encode, Integer, Tag};
use proptest::prelude::*;

fn arb_primitive() -> impl Strategy<Value = Any> {
    (
        prop_oneof![
            Just(Tag::INTEGER),
            Just(Tag::OCTET_STRING),
            Just(Tag::IA5_STRING),
            Just(Tag::context(2, false)),
        ],
        proptest::collection::vec(any::<u8>(), 0..300),
    )
        .prop_map(|(tag, value)| Any::new(tag, value))
}

fn arb_tree() -> impl Strategy<Value = Any> {
    arb_primitive().prop_recursive(3, 32, 6, |inner| {
        (
            prop_oneof![Just(Tag::SEQUENCE), Just(Tag::context(0, true))],
            proptest::collection::vec(inner, 0..6),
        )
            .prop_map(|(tag, children)| Any::constructed(tag, &children))
    })
}

proptest! {
    #[test]
    fn test_reencode_is_identity(tree in arb_tree()) {
        let der = tree.to_der();
        let parsed = Any::from_der(der.as_bytes()).unwrap();
        prop_assert_eq!(&parsed, &tree);
        prop_assert_eq!(parsed.to_der(), der);
    }

    #[test]
    fn test_encoded_len_matches(tree in arb_tree()) {
        prop_assert_eq!(tree.encoded_len(), tree.to_der().len());
    }

    #[test]
    fn test_integer_value_preserved(value in any::<i64>()) {
        let der = Integer::new(value).to_der();
        let decoded = Integer::from_der(der.as_bytes()).unwrap();
        prop_assert_eq!(decoded.value(), value);
    }

    #[test]
    fn test_set_of_is_order_independent(
        (members, shuffled) in proptest::collection::vec(arb_primitive(), 0..8)
            .prop_flat_map(|m| (Just(m.clone()), Just(m).prop_shuffle())),
    ) {
        prop_assert_eq!(Any::set_of(&shuffled), Any::set_of(&members));
    }

    #[test]
    fn test_truncation_never_parses(tree in arb_tree(), cut in 1usize..8) {
        let der = tree.to_der().into_vec();
        prop_assume!(cut < der.len());
        let truncated = &der[..der.len() - cut];
        prop_assert!(Any::from_der(truncated).is_err());
    }
}
