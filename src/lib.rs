//! `abi-core`: a codec for the Ethereum contract ABI calling convention.
//!
//! Parses a type descriptor string (e.g. `uint256`, `bytes`,
//! `(address,uint256)[]`) into a [`types::TypeNode`], then encodes
//! language-level [`types::Value`]s into the canonical 32-byte-word
//! binary layout and decodes such streams back.
//!
//! ```
//! use abi_core::{decode, encode};
//! use abi_core::types::Value;
//! use num_bigint::BigUint;
//!
//! let value = Value::Uint(BigUint::from(400_000_000_000u64));
//! let bytes = encode("uint256", &value).unwrap();
//! assert_eq!(decode("uint256", &bytes).unwrap(), value);
//! ```

pub mod codec;
pub mod composite;
pub mod error;
pub mod grammar;
pub mod numeric;
pub mod primitives;
pub mod stream;
pub mod types;

pub use codec::{encode, decode, build_codec, Codec, CodecFactory};
pub use error::AbiError;
pub use grammar::parse;
pub use types::{Address, ArrayLen, TypeNode, Value};
