//! The type grammar: a tokenizer plus recursive-descent parser that
//! turns a textual ABI type descriptor into a validated `TypeNode` tree.
//!
//! ```text
//! type      := atom arrayspec*
//! atom      := tuple | primitive
//! tuple     := '(' type (',' type)* ')' | '()'
//! arrayspec := '[' digits? ']'
//! primitive := identifier size?
//! size      := digits | digits 'x' digits
//! ```
//!
//! Grounded directly on `eth_abi/utils/parsing.py`'s `TYPE_COMPONENTS_RE`
//! / `process_strict_type` / `normalize_type` (see
//! `examples/original_source/`), translated from a regex-driven grammar
//! into a character-at-a-time recursive descent, which is the idiomatic
//! shape for this kind of small grammar in Rust.

use crate::error::AbiError;
use crate::types::{ArrayLen, TypeNode};

/// Parses a type descriptor string into a validated `TypeNode`.
pub fn parse(type_string: &str) -> Result<TypeNode, AbiError> {
    let mut parser = Parser {
        src: type_string,
        pos: 0,
    };
    let node = parser.parse_type()?;
    if parser.pos != type_string.len() {
        return Err(AbiError::parse(
            type_string,
            format!("unexpected trailing input at byte {}", parser.pos),
        ));
    }
    Ok(node)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, byte: u8) -> Result<(), AbiError> {
        if self.peek() == Some(byte) {
            self.advance();
            Ok(())
        } else {
            Err(AbiError::parse(
                self.src,
                format!("expected {:?} at byte {}", byte as char, self.pos),
            ))
        }
    }

    fn parse_type(&mut self) -> Result<TypeNode, AbiError> {
        let atom = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            self.parse_primitive()?
        };
        self.parse_array_suffixes(atom)
    }

    fn parse_tuple(&mut self) -> Result<TypeNode, AbiError> {
        self.expect(b'(')?;
        let mut members = Vec::new();
        if self.peek() == Some(b')') {
            self.advance();
            return Ok(TypeNode::Tuple { members });
        }
        loop {
            members.push(self.parse_type()?);
            match self.peek() {
                Some(b',') => self.advance(),
                Some(b')') => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(AbiError::parse(
                        self.src,
                        format!("expected ',' or ')' at byte {}", self.pos),
                    ))
                }
            }
        }
        Ok(TypeNode::Tuple { members })
    }

    fn parse_array_suffixes(&mut self, mut node: TypeNode) -> Result<TypeNode, AbiError> {
        while self.peek() == Some(b'[') {
            self.advance();
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            let digits = &self.src[start..self.pos];
            self.expect(b']')?;
            let len = if digits.is_empty() {
                ArrayLen::Dynamic
            } else {
                let n: usize = digits
                    .parse()
                    .map_err(|_| AbiError::parse(self.src, "array length is not a valid integer"))?;
                ArrayLen::Fixed(n)
            };
            node = TypeNode::Array {
                inner: Box::new(node),
                len,
            };
        }
        Ok(node)
    }

    fn parse_primitive(&mut self) -> Result<TypeNode, AbiError> {
        let ident_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_lowercase()) {
            self.advance();
        }
        if self.pos == ident_start {
            return Err(AbiError::parse(
                self.src,
                format!("expected a type identifier at byte {}", self.pos),
            ));
        }
        let ident = &self.src[ident_start..self.pos];

        let size_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'x') {
            self.advance();
        }
        let size = &self.src[size_start..self.pos];

        build_primitive(ident, size, self.src)
    }
}

fn build_primitive(ident: &str, sub: &str, type_string: &str) -> Result<TypeNode, AbiError> {
    // Normalization: fill in the default widths spec.md §4.1 assigns a
    // bare `int`/`uint`/`fixed`/`ufixed`, and resolve the `function`
    // alias. This runs before validation, exactly as in the original
    // `normalize_type`.
    match ident {
        "uint" | "int" => {
            let sub = if sub.is_empty() { "256" } else { sub };
            validate_uint_int_size(ident, sub, type_string)?;
            let bits: u16 = sub.parse().expect("validated digits");
            Ok(if ident == "uint" {
                TypeNode::UInt { bits }
            } else {
                TypeNode::Int { bits }
            })
        }
        "bool" => {
            require_no_suffix("bool", sub, type_string)?;
            Ok(TypeNode::Bool)
        }
        "address" => {
            require_no_suffix("address", sub, type_string)?;
            Ok(TypeNode::Address)
        }
        "bytes" => {
            if sub.is_empty() {
                Ok(TypeNode::Bytes)
            } else {
                validate_decimal(sub, type_string, "bytes size")?;
                let n: u16 = sub.parse().expect("validated digits");
                if n < 1 || n > 32 {
                    return Err(AbiError::validation(
                        type_string,
                        "fixed-size bytes must have a size between 1 and 32",
                    ));
                }
                Ok(TypeNode::FixedBytes { len: n as u8 })
            }
        }
        "string" => {
            require_no_suffix("string", sub, type_string)?;
            Ok(TypeNode::String)
        }
        "function" => {
            require_no_suffix("function", sub, type_string)?;
            Ok(TypeNode::FixedBytes { len: 24 })
        }
        "fixed" | "ufixed" => {
            let sub = if sub.is_empty() { "128x18" } else { sub };
            let (high, low) = parse_two_part_size(sub, type_string, "fixed/ufixed")?;
            if high % 8 != 0 || !(8..=256).contains(&high) {
                return Err(AbiError::validation(
                    type_string,
                    "fixed/ufixed high part must be a multiple of 8 in [8,256]",
                ));
            }
            if !(1..=80).contains(&low) {
                return Err(AbiError::validation(
                    type_string,
                    "fixed/ufixed low part must be in [1,80]",
                ));
            }
            Ok(TypeNode::Reserved {
                base: ident.to_string(),
                sub: sub.to_string(),
            })
        }
        "real" | "ureal" => {
            let (high, low) = parse_two_part_size(sub, type_string, "real/ureal")?;
            if !(8..=256).contains(&(high + low)) {
                return Err(AbiError::validation(
                    type_string,
                    "real/ureal high+low must be in [8,256]",
                ));
            }
            if high % 8 != 0 || low % 8 != 0 {
                return Err(AbiError::validation(
                    type_string,
                    "real/ureal high and low parts must be multiples of 8",
                ));
            }
            Ok(TypeNode::Reserved {
                base: ident.to_string(),
                sub: sub.to_string(),
            })
        }
        "hash" => {
            validate_decimal(sub, type_string, "hash size")?;
            Ok(TypeNode::Reserved {
                base: "hash".to_string(),
                sub: sub.to_string(),
            })
        }
        other => Err(AbiError::parse(type_string, format!("unknown type identifier {other:?}"))),
    }
}

fn require_no_suffix(base: &str, sub: &str, type_string: &str) -> Result<(), AbiError> {
    if sub.is_empty() {
        Ok(())
    } else {
        Err(AbiError::validation(type_string, format!("{base} cannot have a size suffix")))
    }
}

fn validate_decimal(sub: &str, type_string: &str, what: &str) -> Result<(), AbiError> {
    if !sub.is_empty() && sub.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AbiError::validation(type_string, format!("{what} must be a decimal integer")))
    }
}

fn validate_uint_int_size(ident: &str, sub: &str, type_string: &str) -> Result<(), AbiError> {
    if sub.is_empty() || !sub.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::validation(
            type_string,
            format!("{ident} must have a numeric size suffix"),
        ));
    }
    let bits: u32 = sub
        .parse()
        .map_err(|_| AbiError::validation(type_string, format!("{ident} size is not a valid integer")))?;
    if bits < 8 || bits > 256 {
        return Err(AbiError::validation(
            type_string,
            format!("{ident} size must be in [8,256], got {bits}"),
        ));
    }
    if bits % 8 != 0 {
        return Err(AbiError::validation(
            type_string,
            format!("{ident} size must be a multiple of 8, got {bits}"),
        ));
    }
    Ok(())
}

fn parse_two_part_size(sub: &str, type_string: &str, what: &str) -> Result<(u16, u16), AbiError> {
    let (high, low) = sub
        .split_once('x')
        .ok_or_else(|| AbiError::validation(type_string, format!("{what} requires a <high>x<low> size suffix")))?;
    if high.is_empty()
        || low.is_empty()
        || !high.bytes().all(|b| b.is_ascii_digit())
        || !low.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AbiError::validation(
            type_string,
            format!("{what} size must be of the form <high>x<low>, e.g. 128x18"),
        ));
    }
    let high: u16 = high
        .parse()
        .map_err(|_| AbiError::validation(type_string, format!("{what} high part is not a valid integer")))?;
    let low: u16 = low
        .parse()
        .map_err(|_| AbiError::validation(type_string, format!("{what} low part is not a valid integer")))?;
    Ok((high, low))
}
