//! Scripts: serialized opcode sequences, their textual form, and a small
//! evaluator for checking spends of the templates in this crate.
//!
//! The text form is space-separated: `OP_*` mnemonics for opcodes and hex for
//! pushed data. Hex literals are pushed with the shortest push opcode for
//! their length, so `Script::from_asm(&s.to_asm())` reproduces `s` byte for byte
//! for every script this crate builds.
//!
//! # Examples
//! ```
//! use eris::script::{op_codes::*, Script};
//! let s = Script::from_asm("OP_DUP OP_HASH160 0a0b OP_EQUAL").unwrap();
//! assert_eq!(s.0, vec![OP_DUP, OP_HASH160, 2, 0x0a, 0x0b, OP_EQUAL]);
//! assert_eq!(s.to_asm(), "OP_DUP OP_HASH160 0a0b OP_EQUAL");
//! ```
use crate::util::{var_int, Error, Result};
use std::fmt;

mod checker;
pub mod interpreter;
pub mod op_codes;
pub mod stack;

pub use self::checker::{Checker, DigestChecker, TransactionlessChecker};
pub use self::interpreter::{eval, eval_witness, next_op};

use self::op_codes::*;
use self::stack::encode_num;

/// Serialized script.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

/// One element of a parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A non-push opcode, or `OP_0`.
    Op(u8),
    /// Data pushed by a direct push or an `OP_PUSHDATA*` opcode.
    Push(Vec<u8>),
}

impl Script {
    /// Creates a new empty script.
    #[must_use]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single opcode or data byte.
    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends a slice of data without a length prefix.
    #[inline]
    pub fn append_slice(&mut self, slice: &[u8]) {
        self.0.extend_from_slice(slice);
    }

    /// Appends the opcodes and provided data that push it onto the stack.
    ///
    /// Empty data becomes `OP_0`; 1-75 bytes use a direct push; longer data uses
    /// the smallest `OP_PUSHDATA*` that fits. Single-byte values are always pushed
    /// as data, never as `OP_1`..`OP_16`.
    ///
    /// # Errors
    /// `Error::BadData` if the data is too long to push.
    pub fn append_data(&mut self, data: &[u8]) -> Result<()> {
        let len = data.len();
        match len {
            0 => self.0.push(OP_0),
            1..=75 => self.0.push(OP_PUSH + len as u8),
            76..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            0x100..=0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                let len = u32::try_from(len).map_err(|_| Error::BadData(format!("Data too long to push: {}", len)))?;
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&len.to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Appends a number as a pushed script number. Zero becomes `OP_0`.
    pub fn append_num(&mut self, n: i64) -> Result<()> {
        self.append_data(&encode_num(n))
    }

    /// Parses the space-separated text form.
    ///
    /// # Errors
    /// `Error::BadData` for an unknown `OP_` mnemonic, `Error::FromHexError` for a
    /// literal that is not hex.
    pub fn from_asm(asm: &str) -> Result<Script> {
        let mut script = Script::new();
        for token in asm.split_whitespace() {
            if token.starts_with("OP_") {
                let op = op_from_name(token).ok_or_else(|| Error::BadData(format!("Unknown opcode: {}", token)))?;
                script.append(op);
            } else {
                script.append_data(&hex::decode(token)?)?;
            }
        }
        Ok(script)
    }

    /// Splits the script into opcodes and pushed data.
    ///
    /// # Errors
    /// `Error::BadData` if a push runs past the end of the script.
    pub fn tokens(&self) -> Result<Vec<Token>> {
        let script = &self.0;
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < script.len() {
            let (start, len) = match script[i] {
                len @ 1..=75 => (i + 1, len as usize),
                OP_PUSHDATA1 => {
                    remains(i + 1, 1, script)?;
                    (i + 2, script[i + 1] as usize)
                }
                OP_PUSHDATA2 => {
                    remains(i + 1, 2, script)?;
                    (i + 3, u16::from_le_bytes([script[i + 1], script[i + 2]]) as usize)
                }
                OP_PUSHDATA4 => {
                    remains(i + 1, 4, script)?;
                    let len = u32::from_le_bytes([script[i + 1], script[i + 2], script[i + 3], script[i + 4]]);
                    (i + 5, len as usize)
                }
                op => {
                    tokens.push(Token::Op(op));
                    i += 1;
                    continue;
                }
            };
            remains(start, len, script)?;
            tokens.push(Token::Push(script[start..start + len].to_vec()));
            i = start + len;
        }
        Ok(tokens)
    }

    /// Renders the space-separated text form.
    #[must_use]
    pub fn to_asm(&self) -> String {
        self.to_string()
    }

    /// Returns the script prefixed with its var-int length, as committed to by
    /// the BIP-143 signature hash.
    pub fn script_code(&self) -> Result<Vec<u8>> {
        let mut v = Vec::with_capacity(var_int::size(self.0.len() as u64) + self.0.len());
        var_int::write(self.0.len() as u64, &mut v)?;
        v.extend_from_slice(&self.0);
        Ok(v)
    }

    /// Evaluates the script against an initial stack (bottom item first).
    pub fn eval<T: Checker>(&self, stack: Vec<Vec<u8>>, checker: &mut T) -> Result<()> {
        eval(&self.0, stack, checker)
    }
}

fn remains(i: usize, len: usize, script: &[u8]) -> Result<()> {
    if i + len > script.len() {
        Err(Error::BadData("Push runs past end of script".to_string()))
    } else {
        Ok(())
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tokens = match self.tokens() {
            Ok(tokens) => tokens,
            Err(_) => return write!(f, "[invalid script {}]", hex::encode(&self.0)),
        };
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                Token::Op(op) => match op_name(*op) {
                    Some(name) => f.write_str(name)?,
                    None => write!(f, "OP_UNKNOWN{}", op)?,
                },
                Token::Push(data) => f.write_str(&hex::encode(data))?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", self)
    }
}
