// SPDX-License-Identifier: Apache-2.0

/// What kind of malformed input was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrKind {
    /// `finish` was called before any value was seen.
    EmptyStream,
    /// Input ended inside a value or with containers still open.
    UnfinishedStream,
    /// The root value does not start with a valid byte.
    InvalidRoot,
    /// A `true`, `false` or `null` literal was misspelled.
    InvalidToken,
    /// A raw byte below 0x20 inside a string or key.
    UnescapedControlCharacter,
    /// A comma directly before `]` or `}`.
    TrailingComma,
    /// Non-whitespace after the root value.
    ContentEnded,
    /// A closing delimiter does not match the innermost open container.
    MismatchedDelimiter,
    InvalidNumber,
    /// A non-hex digit inside `\uXXXX`.
    InvalidUnicodeEscape,
    /// A lone or misordered UTF-16 surrogate.
    InvalidUnicodeCodepoint,
    /// An unknown character after `\`.
    InvalidStringEscape,
    ExpectedObjectKey,
    ExpectedObjectValue,
    ExpectedColon,
    ExpectedComma,
    ExpectedArrayItem,
}

/// Malformed input, located by absolute byte offset.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    kind: ErrKind,
    byte: u8,
    offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(kind: ErrKind, byte: u8, offset: usize) -> Self {
        Self { kind, byte, offset }
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The offending byte, or a space when the error was raised at end of input.
    pub fn byte(&self) -> u8 {
        self.byte
    }

    /// Absolute offset across every chunk written since the parse began.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl core::fmt::Debug for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:?}({}) at {}",
            self.kind,
            self.byte.escape_ascii(),
            self.offset
        )
    }
}

impl core::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:?} at byte {} ('{}')",
            self.kind,
            self.offset,
            self.byte.escape_ascii()
        )
    }
}

/// Errors raised by the parsing engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The frame stack is full and the sink refused to grow it.
    StackOverflow {
        /// Nesting depth reached when the push was attempted.
        depth: usize,
    },
    /// The input is not well-formed JSON.
    Syntax(SyntaxError),
    /// The parser already failed; call `reset` before feeding more input.
    Aborted,
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::StackOverflow { depth } => {
                write!(f, "frame stack overflow at depth {depth}")
            }
            ParseError::Syntax(e) => write!(f, "syntax error: {e}"),
            ParseError::Aborted => write!(f, "parser is in a failed state"),
        }
    }
}

impl core::error::Error for ParseError {}

/// An error that can occur during push-based parsing.
#[derive(Debug, PartialEq)]
pub enum PushParseError<E> {
    /// An error occurred within the parser itself.
    Parse(ParseError),
    /// An error was returned by the event sink.
    Handler(E),
}

impl<E> PushParseError<E> {
    /// Returns the engine error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            PushParseError::Parse(e) => Some(e),
            PushParseError::Handler(_) => None,
        }
    }
}

impl<E> From<ParseError> for PushParseError<E> {
    fn from(e: ParseError) -> Self {
        PushParseError::Parse(e)
    }
}

impl<E> From<SyntaxError> for PushParseError<E> {
    fn from(e: SyntaxError) -> Self {
        PushParseError::Parse(e.into())
    }
}

impl<E: core::fmt::Display> core::fmt::Display for PushParseError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PushParseError::Parse(e) => write!(f, "{e}"),
            PushParseError::Handler(e) => write!(f, "event sink failed: {e}"),
        }
    }
}

impl<E: core::fmt::Debug + core::fmt::Display> core::error::Error for PushParseError<E> {}
