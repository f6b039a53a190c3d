// SPDX-License-Identifier: Apache-2.0

use core::fmt::Write;
use core::str::FromStr;

use crate::ErrKind;

/// A JSON number with sign, digits and exponent already resolved.
///
/// The value is `mantissa * 10^exponent`, negated when `negative` is set.
/// Digits are kept in the mantissa for as long as they fit in a `u64`; further
/// integer digits are folded into the exponent and further fraction digits are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedNumber {
    pub mantissa: u64,
    pub exponent: i32,
    pub negative: bool,
    /// True when the literal had neither a fraction nor an exponent.
    pub integer: bool,
}

/// Fixed buffer long enough for `-{u64}e{i32}`.
struct FloatText {
    bytes: [u8; 40],
    len: usize,
}

impl core::fmt::Write for FloatText {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        let dst = self.bytes.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

// Cap on the explicit exponent; anything larger already saturates f64.
const EXPONENT_LIMIT: i32 = 1_000_000;

impl DecodedNumber {
    /// Converts to `f64`, correctly rounded.
    ///
    /// Out-of-range magnitudes saturate: `1e400` becomes infinity and `1e-400`
    /// becomes zero, both keeping the sign.
    pub fn as_f64(&self) -> f64 {
        let mut text = FloatText {
            bytes: [0; 40],
            len: 0,
        };
        let sign = if self.negative { "-" } else { "" };
        if write!(text, "{sign}{}e{}", self.mantissa, self.exponent).is_err() {
            return f64::NAN;
        }
        text.bytes
            .get(..text.len)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
            .and_then(|s| f64::from_str(s).ok())
            .unwrap_or(f64::NAN)
    }

    /// Returns the value as `i64` if it is an integer literal that fits.
    pub fn as_i64(&self) -> Option<i64> {
        if !self.integer || self.exponent != 0 {
            return None;
        }
        if self.negative {
            0i64.checked_sub_unsigned(self.mantissa)
        } else {
            i64::try_from(self.mantissa).ok()
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer literal that fits.
    pub fn as_u64(&self) -> Option<u64> {
        if !self.integer || self.exponent != 0 || (self.negative && self.mantissa != 0) {
            return None;
        }
        Some(self.mantissa)
    }
}

impl core::fmt::Display for DecodedNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_i64() {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "{}", self.as_f64()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Num {
    Sign,
    LeadingZero,
    BeforeDecimalPoint,
    Decimal,
    AfterDecimalPoint,
    Exponent,
    ExponentSign,
    AfterExponent,
}

/// Incremental number decoder, fed one byte at a time.
///
/// Keeps only the running decoded state, so a number split across input
/// chunks needs no buffering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberDecoder {
    state: Num,
    negative: bool,
    mantissa: u64,
    // Integer digits that did not fit in the mantissa
    dropped: i32,
    fraction_digits: i32,
    exp_negative: bool,
    exp_value: i32,
}

/// Outcome of feeding one byte to the decoder.
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// The byte belongs to the number.
    Consumed,
    /// The byte ends the number and must be processed by the caller.
    Terminated,
}

impl NumberDecoder {
    /// Starts a number at its first byte, which must be `-` or a digit.
    pub fn begin(first: u8) -> Result<Self, ErrKind> {
        let mut decoder = Self {
            state: Num::Sign,
            negative: false,
            mantissa: 0,
            dropped: 0,
            fraction_digits: 0,
            exp_negative: false,
            exp_value: 0,
        };
        match first {
            b'-' => decoder.negative = true,
            b'0'..=b'9' => {
                decoder.push(first)?;
            }
            _ => return Err(ErrKind::InvalidNumber),
        }
        Ok(decoder)
    }

    pub fn push(&mut self, byte: u8) -> Result<Step, ErrKind> {
        self.state = match (self.state, byte) {
            (Num::Sign, b'0') => Num::LeadingZero,
            (Num::Sign, b'1'..=b'9') => {
                self.add_integer_digit(byte);
                Num::BeforeDecimalPoint
            }
            (Num::BeforeDecimalPoint, b'0'..=b'9') => {
                self.add_integer_digit(byte);
                Num::BeforeDecimalPoint
            }
            (Num::LeadingZero | Num::BeforeDecimalPoint, b'.') => Num::Decimal,
            (Num::Decimal | Num::AfterDecimalPoint, b'0'..=b'9') => {
                self.add_fraction_digit(byte);
                Num::AfterDecimalPoint
            }
            (
                Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint,
                b'e' | b'E',
            ) => Num::Exponent,
            (Num::Exponent, b'+') => Num::ExponentSign,
            (Num::Exponent, b'-') => {
                self.exp_negative = true;
                Num::ExponentSign
            }
            (Num::Exponent | Num::ExponentSign | Num::AfterExponent, b'0'..=b'9') => {
                let digit = i32::from(byte - b'0');
                self.exp_value = self
                    .exp_value
                    .saturating_mul(10)
                    .saturating_add(digit)
                    .min(EXPONENT_LIMIT);
                Num::AfterExponent
            }
            (
                Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint | Num::AfterExponent,
                b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}',
            ) => return Ok(Step::Terminated),
            _ => return Err(ErrKind::InvalidNumber),
        };
        Ok(Step::Consumed)
    }

    /// Completes the number; fails if the grammar stopped half way (`-`, `1.`, `1e`).
    pub fn finish(&self) -> Result<DecodedNumber, ErrKind> {
        match self.state {
            Num::LeadingZero | Num::BeforeDecimalPoint | Num::AfterDecimalPoint | Num::AfterExponent => {}
            Num::Sign | Num::Decimal | Num::Exponent | Num::ExponentSign => {
                return Err(ErrKind::InvalidNumber)
            }
        }
        let explicit = if self.exp_negative {
            -self.exp_value
        } else {
            self.exp_value
        };
        let exponent = explicit
            .saturating_add(self.dropped)
            .saturating_sub(self.fraction_digits);
        let integer = matches!(self.state, Num::LeadingZero | Num::BeforeDecimalPoint);
        Ok(DecodedNumber {
            mantissa: self.mantissa,
            exponent,
            negative: self.negative,
            integer,
        })
    }

    fn fits_digit(&self) -> bool {
        self.mantissa <= (u64::MAX - 9) / 10
    }

    fn add_integer_digit(&mut self, byte: u8) {
        if self.fits_digit() {
            self.mantissa = self.mantissa * 10 + u64::from(byte - b'0');
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    fn add_fraction_digit(&mut self, byte: u8) {
        if self.fits_digit() {
            self.mantissa = self.mantissa * 10 + u64::from(byte - b'0');
            self.fraction_digits = self.fraction_digits.saturating_add(1);
        }
    }
}
