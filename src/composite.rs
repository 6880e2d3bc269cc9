//! Tuple and array codecs implementing the head/tail offset protocol
//! of spec.md §4.4. A fixed-size array is a tuple of `k` identical
//! types; a dynamic-size array prepends a `uint256` length and then
//! encodes its elements exactly like a fixed-size array of that length,
//! with its *own* head as the local base for any per-element offsets.

use std::sync::Arc;

use num_bigint::BigUint;

use crate::codec::{decode_head_tail, encode_head_tail, Codec};
use crate::error::AbiError;
use crate::numeric::uint_to_word;
use crate::stream::Reader;
use crate::types::{ArrayLen, TypeNode, Value};

pub struct TupleCodec {
    pub members: Vec<Arc<dyn Codec>>,
}

impl Codec for TupleCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Tuple {
            members: self.members.iter().map(|m| m.type_node()).collect(),
        }
    }

    fn head_width(&self) -> usize {
        if self.is_dynamic() {
            32
        } else {
            self.members.iter().map(|m| m.head_width()).sum()
        }
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let type_string = self.type_node().canonical();
        let items = match value {
            Value::Tuple(items) => items,
            _ => return Err(AbiError::validation(type_string, "expected a tuple value")),
        };
        if items.len() != self.members.len() {
            return Err(AbiError::WrongLength {
                type_string,
                expected: self.members.len(),
                actual: items.len(),
            });
        }
        let pairs: Vec<(&dyn Codec, &Value)> = self
            .members
            .iter()
            .map(|c| c.as_ref())
            .zip(items.iter())
            .collect();
        encode_head_tail(&pairs)
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let type_string = self.type_node().canonical();
        let codecs: Vec<&dyn Codec> = self.members.iter().map(|c| c.as_ref()).collect();
        let values = decode_head_tail(reader, &codecs, &type_string)?;
        Ok(Value::Tuple(values))
    }
}

pub struct ArrayCodec {
    pub inner: Arc<dyn Codec>,
    pub len: ArrayLen,
}

impl Codec for ArrayCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Array {
            inner: Box::new(self.inner.type_node()),
            len: self.len,
        }
    }

    fn head_width(&self) -> usize {
        if self.is_dynamic() {
            32
        } else {
            match self.len {
                ArrayLen::Fixed(k) => k * self.inner.head_width(),
                ArrayLen::Dynamic => unreachable!("a dynamic-size array is always dynamic"),
            }
        }
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let type_string = self.type_node().canonical();
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(AbiError::validation(type_string, "expected an array value")),
        };

        if let ArrayLen::Fixed(k) = self.len {
            if items.len() != k {
                return Err(AbiError::WrongLength {
                    type_string,
                    expected: k,
                    actual: items.len(),
                });
            }
        }

        let pairs: Vec<(&dyn Codec, &Value)> = items.iter().map(|v| (self.inner.as_ref(), v)).collect();
        let elements = encode_head_tail(&pairs)?;

        match self.len {
            ArrayLen::Fixed(_) => Ok(elements),
            ArrayLen::Dynamic => {
                let mut out = uint_to_word(&BigUint::from(items.len()), 256, "uint256")
                    .expect("length fits in uint256")
                    .to_vec();
                out.extend_from_slice(&elements);
                Ok(out)
            }
        }
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let type_string = self.type_node().canonical();
        let length = match self.len {
            ArrayLen::Fixed(k) => k,
            ArrayLen::Dynamic => reader.read_length(&type_string)?,
        };
        let inner_ref = self.inner.as_ref();
        // A crafted length word is only bounded to "fits in a usize", up
        // to `usize::MAX`. Reject a length whose head region could not
        // possibly fit in what's left of the buffer before building a
        // per-element codec vector or decoding a single element — this
        // is the same bounds check the teacher's `read_array_fixed`/
        // `read_array_dyn` perform ahead of any per-element work.
        let remaining = reader.len().saturating_sub(reader.tell());
        let min_element_width = inner_ref.head_width().max(1);
        match length.checked_mul(min_element_width) {
            Some(needed) if needed <= remaining => {}
            _ => {
                return Err(AbiError::InsufficientData {
                    type_string,
                    offset: reader.tell(),
                })
            }
        }
        let codecs: Vec<&dyn Codec> = std::iter::repeat(inner_ref).take(length).collect();
        let values = decode_head_tail(reader, &codecs, &type_string)?;
        Ok(Value::Array(values))
    }
}
