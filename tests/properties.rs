//! Property-based tests for the universal properties spec.md §8 calls
//! out: round-trip, idempotent parse, padding integrity, and truncation
//! safety. Bounded to a small recursive depth so the generators stay
//! fast; depth and width are not meant to be exhaustive, just varied.

use abi_core::types::{Address, Value};
use abi_core::{decode, encode, parse, AbiError};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

/// A (type string, matching value) pair, generated together so the
/// value is always well-typed for the type.
#[derive(Debug, Clone)]
struct TypedValue {
    type_string: String,
    value: Value,
}

fn leaf_strategy() -> BoxedStrategy<TypedValue> {
    prop_oneof![
        any::<u64>().prop_map(|n| TypedValue {
            type_string: "uint256".to_string(),
            value: Value::Uint(BigUint::from(n)),
        }),
        any::<i64>().prop_map(|n| TypedValue {
            type_string: "int256".to_string(),
            value: Value::Int(BigInt::from(n)),
        }),
        any::<bool>().prop_map(|b| TypedValue {
            type_string: "bool".to_string(),
            value: Value::Bool(b),
        }),
        any::<[u8; 20]>().prop_map(|bytes| TypedValue {
            type_string: "address".to_string(),
            value: Value::Address(Address(bytes)),
        }),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(|bytes| TypedValue {
            type_string: "bytes".to_string(),
            value: Value::Bytes(bytes),
        }),
        "[a-zA-Z0-9 ]{0,32}".prop_map(|s| TypedValue {
            type_string: "string".to_string(),
            value: Value::String(s),
        }),
        any::<[u8; 4]>().prop_map(|bytes| TypedValue {
            type_string: "bytes4".to_string(),
            value: Value::FixedBytes(bytes.to_vec()),
        }),
    ]
    .boxed()
}

/// Builds a strategy over arrays whose elements all share the *same*
/// generated type — picking a leaf strategy once and replicating it,
/// rather than sampling each element independently, which would let
/// sibling elements disagree on type.
fn homogeneous_array_strategy(element: BoxedStrategy<TypedValue>, dynamic: bool) -> BoxedStrategy<TypedValue> {
    if dynamic {
        proptest::collection::vec(element, 0..4)
            .prop_map(|items| {
                let elem_type = items.first().map(|i| i.type_string.clone()).unwrap_or_else(|| "uint256".to_string());
                TypedValue {
                    type_string: format!("{elem_type}[]"),
                    value: Value::Array(items.into_iter().map(|t| t.value).collect()),
                }
            })
            .boxed()
    } else {
        proptest::collection::vec(element, 1..4)
            .prop_map(|items| {
                let elem_type = items[0].type_string.clone();
                let k = items.len();
                TypedValue {
                    type_string: format!("{elem_type}[{k}]"),
                    value: Value::Array(items.into_iter().map(|t| t.value).collect()),
                }
            })
            .boxed()
    }
}

fn typed_value_strategy() -> impl Strategy<Value = TypedValue> {
    leaf_strategy().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            homogeneous_array_strategy(inner.clone(), true),
            homogeneous_array_strategy(inner.clone(), false),
            proptest::collection::vec(inner.clone(), 0..4).prop_map(|members| {
                let joined = members
                    .iter()
                    .map(|m| m.type_string.clone())
                    .collect::<Vec<_>>()
                    .join(",");
                TypedValue {
                    type_string: format!("({joined})"),
                    value: Value::Tuple(members.into_iter().map(|t| t.value).collect()),
                }
            }),
        ]
    })
}

proptest! {
    /// Property 1 (round-trip): decode(t, encode(t, v)) == v.
    #[test]
    fn round_trip(tv in typed_value_strategy()) {
        let encoded = encode(&tv.type_string, &tv.value).expect("well-typed value encodes");
        let decoded = decode(&tv.type_string, &encoded).expect("canonical encoding decodes");
        prop_assert_eq!(decoded, tv.value);
    }

    /// Property 2 (idempotent parse): parse(canonical(parse(s))) == parse(s).
    #[test]
    fn idempotent_parse(tv in typed_value_strategy()) {
        let node = parse(&tv.type_string).unwrap();
        let canonical = node.canonical();
        let reparsed = parse(&canonical).unwrap();
        prop_assert_eq!(reparsed.clone(), node);
        prop_assert_eq!(reparsed.canonical(), canonical);
    }

    /// Property 4 (truncation safety): removing any suffix byte from a
    /// valid encoding causes decode to fail cleanly, never panic.
    #[test]
    fn truncation_never_panics(tv in typed_value_strategy()) {
        let encoded = encode(&tv.type_string, &tv.value).unwrap();
        for cut in 1..=encoded.len().min(8) {
            let truncated = &encoded[..encoded.len() - cut];
            let _ = decode(&tv.type_string, truncated);
        }
    }
}

#[test]
fn padding_integrity_uint256_flip_high_bit() {
    let encoded = encode("uint256", &Value::Uint(BigUint::from(1u32))).unwrap();
    let mut dirty = encoded.clone();
    dirty[0] = 1;
    let err = decode("uint256", &dirty).unwrap_err();
    assert!(matches!(err, AbiError::NonEmptyPadding { .. }));
}

#[test]
fn padding_integrity_address_flip_high_bit() {
    let encoded = encode("address", &Value::Address(Address([0xab; 20]))).unwrap();
    let mut dirty = encoded.clone();
    dirty[0] = 1;
    let err = decode("address", &dirty).unwrap_err();
    assert!(matches!(err, AbiError::NonEmptyPadding { .. }));
}

#[test]
fn padding_integrity_fixed_bytes_flip_trailing_byte() {
    let encoded = encode("bytes4", &Value::FixedBytes(vec![1, 2, 3, 4])).unwrap();
    let mut dirty = encoded.clone();
    dirty[31] = 1;
    let err = decode("bytes4", &dirty).unwrap_err();
    assert!(matches!(err, AbiError::NonEmptyPadding { .. }));
}

#[test]
fn padding_integrity_bool_flip_high_bit() {
    let encoded = encode("bool", &Value::Bool(true)).unwrap();
    let mut dirty = encoded.clone();
    dirty[0] = 1;
    let err = decode("bool", &dirty).unwrap_err();
    assert!(matches!(err, AbiError::NonEmptyPadding { .. }));
}
