//! One encoder/decoder pair per ABI primitive kind. Every primitive's
//! on-wire width is exactly one 32-byte word, except `bytes`/`string`
//! which are length-prefixed and padded to a 32-byte multiple.

use num_bigint::BigUint;

use crate::codec::Codec;
use crate::error::AbiError;
use crate::numeric::{ceil32, int_from_word, int_to_word, uint_from_word, uint_to_word, WORD_SIZE};
use crate::stream::Reader;
use crate::types::{Address, TypeNode, Value};

pub struct UintCodec {
    pub bits: u16,
}

impl Codec for UintCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::UInt { bits: self.bits }
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let n = value.as_uint().ok_or_else(|| {
            AbiError::validation(self.type_node().canonical(), "expected an unsigned integer value")
        })?;
        Ok(uint_to_word(n, self.bits, &self.type_node().canonical())?.to_vec())
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let offset = reader.tell();
        let type_string = self.type_node().canonical();
        let word = reader.read_word(&type_string)?;
        Ok(Value::Uint(uint_from_word(&word, self.bits, &type_string, offset)?))
    }
}

pub struct IntCodec {
    pub bits: u16,
}

impl Codec for IntCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Int { bits: self.bits }
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let n = value
            .as_int()
            .ok_or_else(|| AbiError::validation(self.type_node().canonical(), "expected a signed integer value"))?;
        Ok(int_to_word(n, self.bits, &self.type_node().canonical())?.to_vec())
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let offset = reader.tell();
        let type_string = self.type_node().canonical();
        let word = reader.read_word(&type_string)?;
        Ok(Value::Int(int_from_word(&word, self.bits, &type_string, offset)?))
    }
}

pub struct BoolCodec;

impl Codec for BoolCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Bool
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let b = value
            .as_bool()
            .ok_or_else(|| AbiError::validation("bool", "expected a boolean value"))?;
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - 1] = b as u8;
        Ok(word.to_vec())
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let offset = reader.tell();
        let word = reader.read_word("bool")?;
        if word[..WORD_SIZE - 1].iter().any(|&b| b != 0) {
            return Err(AbiError::NonEmptyPadding {
                type_string: "bool".to_string(),
                offset,
            });
        }
        match word[WORD_SIZE - 1] {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            _ => Err(AbiError::NonEmptyPadding {
                type_string: "bool".to_string(),
                offset,
            }),
        }
    }
}

pub struct AddressCodec;

impl Codec for AddressCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Address
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let addr = match value {
            Value::Address(a) => a,
            _ => return Err(AbiError::validation("address", "expected a 20-byte address value")),
        };
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - 20..].copy_from_slice(&addr.0);
        Ok(word.to_vec())
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let offset = reader.tell();
        let word = reader.read_word("address")?;
        if word[..WORD_SIZE - 20].iter().any(|&b| b != 0) {
            return Err(AbiError::NonEmptyPadding {
                type_string: "address".to_string(),
                offset,
            });
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[WORD_SIZE - 20..]);
        Ok(Value::Address(Address(bytes)))
    }
}

pub struct FixedBytesCodec {
    pub len: u8,
}

impl Codec for FixedBytesCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::FixedBytes { len: self.len }
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let bytes = match value {
            Value::FixedBytes(b) => b,
            _ => {
                return Err(AbiError::validation(
                    self.type_node().canonical(),
                    "expected a fixed-size byte string",
                ))
            }
        };
        if bytes.len() != self.len as usize {
            return Err(AbiError::WrongLength {
                type_string: self.type_node().canonical(),
                expected: self.len as usize,
                actual: bytes.len(),
            });
        }
        let mut word = [0u8; WORD_SIZE];
        word[..bytes.len()].copy_from_slice(bytes);
        Ok(word.to_vec())
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let offset = reader.tell();
        let type_string = self.type_node().canonical();
        let word = reader.read_word(&type_string)?;
        let n = self.len as usize;
        if word[n..].iter().any(|&b| b != 0) {
            return Err(AbiError::NonEmptyPadding { type_string, offset });
        }
        Ok(Value::FixedBytes(word[..n].to_vec()))
    }
}

/// Shared by `bytes` and `string`: `uint256 length || payload || zero
/// padding to a 32-byte multiple`.
fn encode_dynamic_bytes(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(WORD_SIZE + ceil32(payload.len()));
    out.extend_from_slice(&uint_to_word(&BigUint::from(payload.len()), 256, "uint256").expect("length fits uint256"));
    out.extend_from_slice(payload);
    let padded = ceil32(payload.len());
    out.resize(WORD_SIZE + padded, 0);
    out
}

fn decode_dynamic_bytes(reader: &mut Reader, type_string: &str) -> Result<Vec<u8>, AbiError> {
    let length = reader.read_length(type_string)?;
    // A crafted length word can be an enormous but still-valid `usize`
    // (up to `usize::MAX`); reject it against the buffer's remaining
    // length before it ever reaches `ceil32`'s addition or `reader.read`'s
    // slicing, so neither can overflow or panic.
    let remaining = reader.len() - reader.tell();
    if length > remaining {
        return Err(AbiError::InsufficientData {
            type_string: type_string.to_string(),
            offset: reader.tell(),
        });
    }
    let padded = ceil32(length);
    let data = reader.read(padded, type_string)?;
    if data[length..].iter().any(|&b| b != 0) {
        return Err(AbiError::NonEmptyPadding {
            type_string: type_string.to_string(),
            offset: reader.tell() - padded,
        });
    }
    Ok(data[..length].to_vec())
}

pub struct BytesCodec;

impl Codec for BytesCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::Bytes
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let bytes = match value {
            Value::Bytes(b) => b,
            _ => return Err(AbiError::validation("bytes", "expected a byte string")),
        };
        Ok(encode_dynamic_bytes(bytes))
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        Ok(Value::Bytes(decode_dynamic_bytes(reader, "bytes")?))
    }
}

pub struct StringCodec;

impl Codec for StringCodec {
    fn type_node(&self) -> TypeNode {
        TypeNode::String
    }

    fn head_width(&self) -> usize {
        WORD_SIZE
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, AbiError> {
        let s = match value {
            Value::String(s) => s,
            _ => return Err(AbiError::validation("string", "expected a string value")),
        };
        Ok(encode_dynamic_bytes(s.as_bytes()))
    }

    fn decode(&self, reader: &mut Reader) -> Result<Value, AbiError> {
        let bytes = decode_dynamic_bytes(reader, "string")?;
        let s = String::from_utf8(bytes)
            .map_err(|_| AbiError::validation("string", "decoded bytes are not valid UTF-8"))?;
        Ok(Value::String(s))
    }
}
