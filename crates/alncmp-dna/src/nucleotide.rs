//! Bit-encoded nucleotide codes.
//!
//! Every alignment column is stored as one byte. The high nibble is the set of canonical
//! bases the call is compatible with, bit 3 marks an unambiguous call, and the two low
//! bits mark gaps and unknown calls:
//!
//! ```text
//!   bit:  7   6   5   4   3            2     1
//!         A   G   C   T   unambiguous  gap   unknown
//! ```
//!
//! Ambiguity codes set several base bits, while `N`, `-` and `?` set all four, so they are
//! compatible with (but never informative against) any call. Two codes share a base iff
//! `x & y >= 16`, which is what makes the column predicates below single bit tests.
//!
//! # Example
//!
//! ```
//! use alncmp_dna::nucleotide::{decode, encode, is_different, is_same_confirmed};
//!
//! let a = encode(b'A').unwrap();
//! let g = encode(b'g').unwrap();
//! let r = encode(b'R').unwrap();
//!
//! assert!(is_different(a, g));
//! assert!(!is_different(a, r)); // R is A or G
//! assert!(is_same_confirmed(a, a));
//! assert_eq!(decode(g), b'G');
//! ```

/// Compatibility bit for adenine.
pub const BASE_A: u8 = 0b1000_0000;
/// Compatibility bit for guanine.
pub const BASE_G: u8 = 0b0100_0000;
/// Compatibility bit for cytosine.
pub const BASE_C: u8 = 0b0010_0000;
/// Compatibility bit for thymine.
pub const BASE_T: u8 = 0b0001_0000;

/// Flag set on a confident single-base call.
pub const UNAMBIGUOUS: u8 = 0b0000_1000;

/// Smallest value of `x & y` for which two codes share at least one base.
pub const SHARED_BASE_THRESHOLD: u8 = BASE_T;

/// Code for an alignment gap.
pub const GAP: u8 = 0b1111_0100;
/// Code for an unknown call (`?`).
pub const UNKNOWN: u8 = 0b1111_0010;
/// Code for `N`.
pub const ANY: u8 = 0b1111_0000;

/// Byte returned by [`decode`] for values that are not nucleotide codes.
pub const UNDECODABLE: u8 = b'?';

/// Every supported uppercase symbol and its code.
pub const ALPHABET: [(u8, u8); 17] = [
    (b'A', BASE_A | UNAMBIGUOUS),
    (b'G', BASE_G | UNAMBIGUOUS),
    (b'C', BASE_C | UNAMBIGUOUS),
    (b'T', BASE_T | UNAMBIGUOUS),
    (b'R', BASE_A | BASE_G),
    (b'M', BASE_A | BASE_C),
    (b'W', BASE_A | BASE_T),
    (b'S', BASE_G | BASE_C),
    (b'K', BASE_G | BASE_T),
    (b'Y', BASE_C | BASE_T),
    (b'V', BASE_A | BASE_G | BASE_C),
    (b'H', BASE_A | BASE_C | BASE_T),
    (b'D', BASE_A | BASE_G | BASE_T),
    (b'B', BASE_G | BASE_C | BASE_T),
    (b'N', ANY),
    (b'-', GAP),
    (b'?', UNKNOWN),
];

/// Symbol -> code, 0 for unsupported symbols (0 is never a valid code).
const ENCODE_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let (symbol, code) = ALPHABET[i];
        table[symbol as usize] = code;
        table[symbol.to_ascii_lowercase() as usize] = code;
        i += 1;
    }
    table
};

/// Code -> uppercase symbol, [`UNDECODABLE`] for non-codes.
const DECODE_TABLE: [u8; 256] = {
    let mut table = [UNDECODABLE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let (symbol, code) = ALPHABET[i];
        table[code as usize] = symbol;
        i += 1;
    }
    table
};

/// Completeness weight per code.
const SCORE_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let code = ALPHABET[i].1;
        table[code as usize] = if code & UNAMBIGUOUS == UNAMBIGUOUS {
            12
        } else {
            match (code >> 4).count_ones() {
                2 => 6,
                3 => 4,
                _ => 0,
            }
        };
        i += 1;
    }
    table
};

/// Encodes one symbol.
///
/// Returns `None` for bytes outside the IUPAC nucleotide alphabet, gap and `?`.
#[inline]
#[must_use]
pub const fn encode(symbol: u8) -> Option<u8> {
    match ENCODE_TABLE[symbol as usize] {
        0 => None,
        code => Some(code),
    }
}

/// Decodes a code back to its uppercase symbol.
///
/// Total over `u8`: anything that [`encode`] never produces decodes to [`UNDECODABLE`].
#[inline]
#[must_use]
pub const fn decode(code: u8) -> u8 {
    DECODE_TABLE[code as usize]
}

/// Completeness weight of a call: 12 for an unambiguous base, 6 for a two-base
/// ambiguity, 4 for a three-base ambiguity and 0 for `N`, gaps and unknowns.
#[inline]
#[must_use]
pub const fn score(code: u8) -> u32 {
    SCORE_TABLE[code as usize]
}

/// True when the two calls have no base in common.
#[inline]
#[must_use]
pub const fn is_different(x: u8, y: u8) -> bool {
    (x & y) < SHARED_BASE_THRESHOLD
}

/// True when both calls are the same unambiguous base.
#[inline]
#[must_use]
pub const fn is_same_confirmed(x: u8, y: u8) -> bool {
    x & UNAMBIGUOUS == UNAMBIGUOUS && x == y
}

/// True for a confident single-base call.
#[inline]
#[must_use]
pub const fn is_unambiguous(code: u8) -> bool {
    code & UNAMBIGUOUS == UNAMBIGUOUS
}
