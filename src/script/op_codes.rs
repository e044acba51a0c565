//! Script opcodes and their textual mnemonics.
//!
//! Values follow the segwit-era Bitcoin opcode table. `op_name` and `op_from_name`
//! back the space-separated text form used by `Script::from_asm` and `Script::to_asm`.
//!
//! # Examples
//! ```
//! use eris::script::op_codes::*;
//! assert_eq!(OP_IF, 99);
//! assert_eq!(op_from_name("OP_CHECKSIG"), Some(OP_CHECKSIG));
//! ```

// Pushdata and Constants
/// Pushes empty array (0/false) onto the stack.
pub const OP_0: u8 = 0;
/// Alias of `OP_0`.
pub const OP_FALSE: u8 = 0;
/// Offset for a direct push of n bytes (n: 1-75): `OP_PUSH + n`.
pub const OP_PUSH: u8 = 0;
/// Next byte is push length (up to 255 bytes).
pub const OP_PUSHDATA1: u8 = 76;
/// Next two bytes are push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 77;
/// Next four bytes are push length.
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes -1 onto the stack.
pub const OP_1NEGATE: u8 = 79;
/// Reserved, fails if executed.
pub const OP_RESERVED: u8 = 80;
/// Pushes 1 (true) onto the stack.
pub const OP_1: u8 = 81;
/// Alias of `OP_1`.
pub const OP_TRUE: u8 = 81;
/// Pushes 16 onto the stack; `OP_2`..`OP_15` lie in between.
pub const OP_16: u8 = 96;

// Flow Control
/// Does nothing.
pub const OP_NOP: u8 = 97;
/// If top stack is true, execute block (pops bool).
pub const OP_IF: u8 = 99;
/// If top stack is false, execute block (pops bool).
pub const OP_NOTIF: u8 = 100;
/// Inverts preceding IF/NOTIF execution.
pub const OP_ELSE: u8 = 103;
/// Ends IF/ELSE block.
pub const OP_ENDIF: u8 = 104;
/// Fails if top stack false (pops bool).
pub const OP_VERIFY: u8 = 105;
/// Marks the output unspendable.
pub const OP_RETURN: u8 = 106;

// Stack Operations
/// Drops top item.
pub const OP_DROP: u8 = 117;
/// Duplicates top.
pub const OP_DUP: u8 = 118;
/// Swaps top two.
pub const OP_SWAP: u8 = 124;

// Bitwise Logic
/// Equals top two (bytes).
pub const OP_EQUAL: u8 = 135;
/// Equals + VERIFY.
pub const OP_EQUALVERIFY: u8 = 136;

// Arithmetic
/// Adds top two.
pub const OP_ADD: u8 = 147;
/// Subtracts top from second.
pub const OP_SUB: u8 = 148;
/// Numeric equal.
pub const OP_NUMEQUAL: u8 = 156;
/// a < b (nums).
pub const OP_LESSTHAN: u8 = 159;
/// a > b (nums).
pub const OP_GREATERTHAN: u8 = 160;
/// a >= b (nums).
pub const OP_GREATERTHANOREQUAL: u8 = 162;

// Cryptography
/// RIPEMD160(top).
pub const OP_RIPEMD160: u8 = 166;
/// SHA256(top).
pub const OP_SHA256: u8 = 168;
/// RIPEMD160(SHA256(top)).
pub const OP_HASH160: u8 = 169;
/// Verifies sig for pubkey/tx (1/0).
pub const OP_CHECKSIG: u8 = 172;
/// CHECKSIG + VERIFY.
pub const OP_CHECKSIGVERIFY: u8 = 173;

// Locktime
/// Fails if the operand is greater than the spending lock time (BIP-65).
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 177;
/// Fails if the operand is greater than the input sequence (BIP-112).
pub const OP_CHECKSEQUENCEVERIFY: u8 = 178;

/// Opcodes >= this have no mnemonic.
pub const OP_INVALID_ABOVE: u8 = 186;

const OP_NAMES: [(u8, &str); 107] = [
    (0, "OP_0"),
    (76, "OP_PUSHDATA1"),
    (77, "OP_PUSHDATA2"),
    (78, "OP_PUSHDATA4"),
    (79, "OP_1NEGATE"),
    (80, "OP_RESERVED"),
    (81, "OP_1"),
    (82, "OP_2"),
    (83, "OP_3"),
    (84, "OP_4"),
    (85, "OP_5"),
    (86, "OP_6"),
    (87, "OP_7"),
    (88, "OP_8"),
    (89, "OP_9"),
    (90, "OP_10"),
    (91, "OP_11"),
    (92, "OP_12"),
    (93, "OP_13"),
    (94, "OP_14"),
    (95, "OP_15"),
    (96, "OP_16"),
    (97, "OP_NOP"),
    (98, "OP_VER"),
    (99, "OP_IF"),
    (100, "OP_NOTIF"),
    (101, "OP_VERIF"),
    (102, "OP_VERNOTIF"),
    (103, "OP_ELSE"),
    (104, "OP_ENDIF"),
    (105, "OP_VERIFY"),
    (106, "OP_RETURN"),
    (107, "OP_TOALTSTACK"),
    (108, "OP_FROMALTSTACK"),
    (109, "OP_2DROP"),
    (110, "OP_2DUP"),
    (111, "OP_3DUP"),
    (112, "OP_2OVER"),
    (113, "OP_2ROT"),
    (114, "OP_2SWAP"),
    (115, "OP_IFDUP"),
    (116, "OP_DEPTH"),
    (117, "OP_DROP"),
    (118, "OP_DUP"),
    (119, "OP_NIP"),
    (120, "OP_OVER"),
    (121, "OP_PICK"),
    (122, "OP_ROLL"),
    (123, "OP_ROT"),
    (124, "OP_SWAP"),
    (125, "OP_TUCK"),
    (126, "OP_CAT"),
    (127, "OP_SUBSTR"),
    (128, "OP_LEFT"),
    (129, "OP_RIGHT"),
    (130, "OP_SIZE"),
    (131, "OP_INVERT"),
    (132, "OP_AND"),
    (133, "OP_OR"),
    (134, "OP_XOR"),
    (135, "OP_EQUAL"),
    (136, "OP_EQUALVERIFY"),
    (137, "OP_RESERVED1"),
    (138, "OP_RESERVED2"),
    (139, "OP_1ADD"),
    (140, "OP_1SUB"),
    (141, "OP_2MUL"),
    (142, "OP_2DIV"),
    (143, "OP_NEGATE"),
    (144, "OP_ABS"),
    (145, "OP_NOT"),
    (146, "OP_0NOTEQUAL"),
    (147, "OP_ADD"),
    (148, "OP_SUB"),
    (149, "OP_MUL"),
    (150, "OP_DIV"),
    (151, "OP_MOD"),
    (152, "OP_LSHIFT"),
    (153, "OP_RSHIFT"),
    (154, "OP_BOOLAND"),
    (155, "OP_BOOLOR"),
    (156, "OP_NUMEQUAL"),
    (157, "OP_NUMEQUALVERIFY"),
    (158, "OP_NUMNOTEQUAL"),
    (159, "OP_LESSTHAN"),
    (160, "OP_GREATERTHAN"),
    (161, "OP_LESSTHANOREQUAL"),
    (162, "OP_GREATERTHANOREQUAL"),
    (163, "OP_MIN"),
    (164, "OP_MAX"),
    (165, "OP_WITHIN"),
    (166, "OP_RIPEMD160"),
    (167, "OP_SHA1"),
    (168, "OP_SHA256"),
    (169, "OP_HASH160"),
    (170, "OP_HASH256"),
    (171, "OP_CODESEPARATOR"),
    (172, "OP_CHECKSIG"),
    (173, "OP_CHECKSIGVERIFY"),
    (174, "OP_CHECKMULTISIG"),
    (175, "OP_CHECKMULTISIGVERIFY"),
    (176, "OP_NOP1"),
    (177, "OP_CHECKLOCKTIMEVERIFY"),
    (178, "OP_CHECKSEQUENCEVERIFY"),
    (179, "OP_NOP4"),
    (180, "OP_NOP5"),
    (181, "OP_NOP6"),
];

const OP_ALIASES: [(&str, u8); 8] = [
    ("OP_FALSE", OP_0),
    ("OP_TRUE", OP_1),
    ("OP_NOP2", OP_CHECKLOCKTIMEVERIFY),
    ("OP_NOP3", OP_CHECKSEQUENCEVERIFY),
    ("OP_NOP7", 182),
    ("OP_NOP8", 183),
    ("OP_NOP9", 184),
    ("OP_NOP10", 185),
];

/// Canonical mnemonic of an opcode, or `None` for direct pushes and undefined bytes.
#[must_use]
pub fn op_name(op: u8) -> Option<&'static str> {
    match op {
        182..=185 => OP_ALIASES.iter().find(|(_, code)| *code == op).map(|(name, _)| *name),
        _ => OP_NAMES.iter().find(|(code, _)| *code == op).map(|(_, name)| *name),
    }
}

/// Opcode for a mnemonic, accepting the `OP_FALSE`/`OP_TRUE`/`OP_NOP2`/`OP_NOP3` aliases.
#[must_use]
pub fn op_from_name(name: &str) -> Option<u8> {
    OP_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
        .or_else(|| OP_ALIASES.iter().find(|(n, _)| *n == name).map(|(_, code)| *code))
}
