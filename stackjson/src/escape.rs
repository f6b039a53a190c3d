// SPDX-License-Identifier: Apache-2.0

use crate::ErrKind;

/// Maps the character after a backslash to the byte it stands for.
///
/// Returns `None` for `u` (handled by [`UnicodeEscape`]) and for anything that
/// is not a JSON escape.
pub(crate) fn simple_escape(escape_char: u8) -> Option<u8> {
    match escape_char {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

fn hex_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'a'..=b'f' => Some(u32::from(byte - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

fn is_high_surrogate(codepoint: u32) -> bool {
    (0xD800..=0xDBFF).contains(&codepoint)
}

fn is_low_surrogate(codepoint: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&codepoint)
}

/// Result of feeding one hex digit.
#[derive(Debug, PartialEq)]
pub(crate) enum Hex {
    /// Fewer than four digits seen so far.
    NeedMore,
    /// A high surrogate was decoded; a `\uXXXX` low surrogate must follow.
    AwaitingLowSurrogate,
    /// A complete character.
    Char(char),
}

/// Collects `\uXXXX` digits and pairs UTF-16 surrogates.
///
/// Holds at most one pending high surrogate, so a pair split across input
/// chunks still decodes.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscape {
    codepoint: u32,
    digits: u8,
    pending_high_surrogate: Option<u32>,
}

impl UnicodeEscape {
    /// Starts collecting digits for a new `\u` sequence.
    pub fn begin(&mut self) {
        self.codepoint = 0;
        self.digits = 0;
    }

    /// True while a high surrogate is waiting for its partner.
    pub fn is_pending(&self) -> bool {
        self.pending_high_surrogate.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn push_hex(&mut self, byte: u8) -> Result<Hex, ErrKind> {
        let digit = hex_value(byte).ok_or(ErrKind::InvalidUnicodeEscape)?;
        self.codepoint = (self.codepoint << 4) | digit;
        self.digits += 1;
        if self.digits < 4 {
            return Ok(Hex::NeedMore);
        }

        let codepoint = self.codepoint;
        match self.pending_high_surrogate.take() {
            Some(high) if is_low_surrogate(codepoint) => {
                let combined = 0x10000 + ((high & 0x3FF) << 10) + (codepoint & 0x3FF);
                char::from_u32(combined)
                    .map(Hex::Char)
                    .ok_or(ErrKind::InvalidUnicodeCodepoint)
            }
            Some(_) => Err(ErrKind::InvalidUnicodeCodepoint),
            None if is_high_surrogate(codepoint) => {
                self.pending_high_surrogate = Some(codepoint);
                Ok(Hex::AwaitingLowSurrogate)
            }
            None => char::from_u32(codepoint)
                .map(Hex::Char)
                .ok_or(ErrKind::InvalidUnicodeCodepoint),
        }
    }
}
