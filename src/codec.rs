//! The codec factory: given a `TypeNode`, assemble a composed, stateless
//! codec and cache it keyed by the canonical type string.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::composite::{ArrayCodec, TupleCodec};
use crate::error::AbiError;
use crate::grammar::parse;
use crate::primitives::{AddressCodec, BoolCodec, BytesCodec, FixedBytesCodec, IntCodec, StringCodec, UintCodec};
use crate::stream::{Reader, Writer};
use crate::types::{ArrayLen, TypeNode, Value};

/// A codec derived purely from a `TypeNode`. Codecs carry no hidden
/// state and are safe to share and invoke concurrently; the only
/// mutable state during a single encode or decode is the stream
/// cursor passed in by the caller.
pub trait Codec: Send + Sync {
    /// The type this codec was built for.
    fn type_node(&self) -> TypeNode;

    /// True iff this type's on-wire length depends on the value.
    fn is_dynamic(&self) -> bool {
        self.type_node().is_dynamic()
    }

    /// The width this type occupies in an enclosing composite's head
    /// region: its static size if static, or exactly 32 bytes (an
    /// offset pointer) if dynamic.
    fn head_width(&self) -> usize;

    /// Encodes `value` into this type's own complete, self-contained
    /// encoding (head followed by tail, with a local base of zero
    /// relative to the returned bytes).
    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError>;

    /// Decodes a value of this type starting at the reader's current
    /// cursor, which is assumed to be this type's own local base.
    /// Advances the cursor past this type's own encoding.
    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError>;
}

/// Builds a stateless [`Codec`] for a [`TypeNode`] by structural
/// recursion: leaves map to primitive codecs, `Array` wraps a
/// sized-array or dynamic-array combinator around its inner codec, and
/// `Tuple` wraps per-member codecs in a tuple combinator.
///
/// Built codecs are memoized in a shared cache keyed by canonical type
/// string, guarded by an `RwLock` so concurrent lookups never block
/// each other and a concurrent miss just means redundant (but safe,
/// idempotent) construction work rather than a race.
#[derive(Default)]
pub struct CodecFactory {
    cache: RwLock<HashMap<String, Arc<dyn Codec>>>,
}

impl CodecFactory {
    pub fn new() -> Self {
        CodecFactory {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Parses `type_string` and returns a cached or freshly built codec
    /// for it.
    pub fn for_type_string(&self, type_string: &str) -> Result<Arc<dyn Codec>, AbiError> {
        if let Some(hit) = self.cache.read().unwrap().get(type_string) {
            return Ok(hit.clone());
        }
        let node = parse(type_string)?;
        let codec = build_codec(&node)?;
        let canonical = node.canonical();
        let mut cache = self.cache.write().unwrap();
        Ok(cache.entry(canonical).or_insert(codec).clone())
    }

    /// Returns a cached or freshly built codec for an already-parsed
    /// `TypeNode`, keyed by its canonical spelling.
    pub fn for_type(&self, node: &TypeNode) -> Result<Arc<dyn Codec>, AbiError> {
        let canonical = node.canonical();
        if let Some(hit) = self.cache.read().unwrap().get(&canonical) {
            return Ok(hit.clone());
        }
        let codec = build_codec(node)?;
        let mut cache = self.cache.write().unwrap();
        Ok(cache.entry(canonical).or_insert(codec).clone())
    }
}

/// Builds a codec tree for `node` without touching any cache. Used
/// recursively while assembling composite codecs, whose members don't
/// need to be independently cacheable.
pub fn build_codec(node: &TypeNode) -> Result<Arc<dyn Codec>, AbiError> {
    let codec: Arc<dyn Codec> = match node {
        TypeNode::UInt { bits } => Arc::new(UintCodec { bits: *bits }),
        TypeNode::Int { bits } => Arc::new(IntCodec { bits: *bits }),
        TypeNode::Bool => Arc::new(BoolCodec),
        TypeNode::Address => Arc::new(AddressCodec),
        TypeNode::FixedBytes { len } => Arc::new(FixedBytesCodec { len: *len }),
        TypeNode::Bytes => Arc::new(BytesCodec),
        TypeNode::String => Arc::new(StringCodec),
        TypeNode::Array { inner, len } => {
            let inner_codec = build_codec(inner)?;
            Arc::new(ArrayCodec {
                inner: inner_codec,
                len: *len,
            })
        }
        TypeNode::Tuple { members } => {
            let member_codecs = members.iter().map(build_codec).collect::<Result<Vec<_>, _>>()?;
            Arc::new(TupleCodec {
                members: member_codecs,
            })
        }
        TypeNode::Reserved { base, sub } => {
            return Err(AbiError::validation(format!("{base}{sub}"), "unsupported type"))
        }
    };
    Ok(codec)
}

/// ABI-encodes `value` as `type_string`, parsing the type string fresh
/// each call. Callers that encode many values against the same type
/// should build a [`CodecFactory`] once instead.
pub fn encode(type_string: &str, value: &Value) -> Result<Vec<u8>, AbiError> {
    let node = parse(type_string)?;
    let codec = build_codec(&node)?;
    codec.encode(value)
}

/// ABI-decodes `bytes` as `type_string`, parsing the type string fresh
/// each call.
pub fn decode(type_string: &str, bytes: &[u8]) -> Result<Value, AbiError> {
    let node = parse(type_string)?;
    let codec = build_codec(&node)?;
    let mut reader = Reader::new(bytes);
    codec.decode(&mut reader)
}

/// Helper used by composite codecs: lays out a sequence of
/// `(codec, value)` pairs as a single head/tail region, per spec.md
/// §4.4. Shared by the tuple codec (distinct member codecs) and the
/// array codecs (the same codec repeated `k` times).
pub(crate) fn encode_head_tail(members: &[(&dyn Codec, &Value)]) -> Result<Vec<u8>, AbiError> {
    use crate::numeric::uint_to_word;
    use num_bigint::BigUint;

    let head_width: usize = members.iter().map(|(codec, _)| codec.head_width()).sum();
    let mut writer = Writer::new();
    for (codec, value) in members {
        if codec.is_dynamic() {
            let body = codec.encode(value)?;
            let offset = head_width + writer.tail_len();
            let word = uint_to_word(&BigUint::from(offset), 256, "uint256").expect("offset fits in uint256");
            writer.push_head(&word);
            writer.push_tail(&body);
        } else {
            writer.push_head(&codec.encode(value)?);
        }
    }
    Ok(writer.finish())
}

/// Mirror of [`encode_head_tail`] for decoding: the reader's cursor at
/// entry is the local base `B`. Static members decode in place; dynamic
/// members have their head offset read, get their target seeked to and
/// decoded, and the cursor is restored to just past the offset word
/// before moving to the next member.
pub(crate) fn decode_head_tail(reader: &mut Reader, codecs: &[&dyn Codec], type_string: &str) -> Result<Vec<Value>, AbiError> {
    let base = reader.tell();
    let mut values = Vec::with_capacity(codecs.len());
    for codec in codecs {
        if codec.is_dynamic() {
            let offset = reader.read_offset(type_string)?;
            let target = base.checked_add(offset).ok_or_else(|| AbiError::InvalidOffset {
                type_string: type_string.to_string(),
                offset,
                buffer_len: reader.len(),
            })?;
            if target > reader.len() {
                return Err(AbiError::InvalidOffset {
                    type_string: type_string.to_string(),
                    offset,
                    buffer_len: reader.len(),
                });
            }
            let anchor = reader.tell();
            reader.seek(target);
            let value = codec.decode(reader)?;
            reader.seek(anchor);
            values.push(value);
        } else {
            values.push(codec.decode(reader)?);
        }
    }
    Ok(values)
}
