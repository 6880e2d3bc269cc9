//! The `TypeNode` type tree and the `Value` shapes it accepts, plus the
//! canonical string form and the `is_dynamic` predicate that the head/tail
//! codec is built around.

use std::fmt;

use num_bigint::{BigInt, BigUint};

/// The length of an `Array` type node: either a fixed element count or
/// `Dynamic` for a `T[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLen {
    Fixed(usize),
    Dynamic,
}

/// A parsed, validated ABI type descriptor.
///
/// `TypeNode`s are immutable once built; a `Codec` is derived purely from
/// one and carries no hidden state of its own (see [`crate::codec`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    UInt { bits: u16 },
    Int { bits: u16 },
    Bool,
    Address,
    FixedBytes { len: u8 },
    Bytes,
    String,
    Array { inner: Box<TypeNode>, len: ArrayLen },
    Tuple { members: Vec<TypeNode> },
    /// A type the grammar recognizes and validates but for which no
    /// runtime codec exists yet (`fixed`/`ufixed`/`real`/`ureal`/`hash`).
    /// Parsing succeeds; `Codec::for_type` rejects it with
    /// `ValidationError("unsupported type")`, per spec.
    Reserved { base: String, sub: String },
}

impl TypeNode {
    /// True iff this type's on-wire length depends on the value: dynamic
    /// bytes/strings, dynamic arrays, fixed arrays of a dynamic type, or
    /// tuples containing any dynamic member. This recursion is what lets
    /// dynamism propagate outward through nested composites.
    pub fn is_dynamic(&self) -> bool {
        match self {
            TypeNode::UInt { .. }
            | TypeNode::Int { .. }
            | TypeNode::Bool
            | TypeNode::Address
            | TypeNode::FixedBytes { .. }
            | TypeNode::Reserved { .. } => false,
            TypeNode::Bytes | TypeNode::String => true,
            TypeNode::Array { inner, len } => matches!(len, ArrayLen::Dynamic) || inner.is_dynamic(),
            TypeNode::Tuple { members } => members.iter().any(TypeNode::is_dynamic),
        }
    }

    /// Re-emits the normalized spelling of this type. Parsing the result
    /// yields an equal `TypeNode`.
    pub fn canonical(&self) -> String {
        match self {
            TypeNode::UInt { bits } => format!("uint{bits}"),
            TypeNode::Int { bits } => format!("int{bits}"),
            TypeNode::Bool => "bool".to_string(),
            TypeNode::Address => "address".to_string(),
            TypeNode::FixedBytes { len } => format!("bytes{len}"),
            TypeNode::Bytes => "bytes".to_string(),
            TypeNode::String => "string".to_string(),
            TypeNode::Array { inner, len } => match len {
                ArrayLen::Fixed(k) => format!("{}[{}]", inner.canonical(), k),
                ArrayLen::Dynamic => format!("{}[]", inner.canonical()),
            },
            TypeNode::Tuple { members } => {
                let joined = members
                    .iter()
                    .map(TypeNode::canonical)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("({joined})")
            }
            TypeNode::Reserved { base, sub } => format!("{base}{sub}"),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// A 20-byte Ethereum address value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(")?;
        fmt::Display::fmt(self, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A language-level value accepted by `encode` and produced by `decode`,
/// per the shapes spec.md §6 assigns to each `TypeNode` variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Uint(BigUint),
    Int(BigInt),
    Bool(bool),
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn as_uint(&self) -> Option<&BigUint> {
        match self {
            Value::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}
