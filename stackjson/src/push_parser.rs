// SPDX-License-Identifier: Apache-2.0

//! A SAX-style JSON push parser.
//!
//! Nesting is tracked in a [`FrameStack`] whose storage comes from the
//! [`EventSink`]; nothing is allocated. Strings are delivered as spans of the
//! caller's input, numbers are decoded on the fly, so input may be written in
//! chunks of any size.

use crate::escape::{simple_escape, Hex, UnicodeEscape};
use crate::number::{NumberDecoder, Step};
use crate::{ErrKind, EventSink, Frame, FrameStack, ParseError, PushParseError, SyntaxError};

#[derive(Debug, Clone, Copy)]
enum State {
    /// Nothing written yet.
    Start,
    /// Expecting the root value.
    Root,
    Object { expect: Object },
    Array { expect: Array },
    String { key: bool, escape: Escape },
    Number(NumberDecoder),
    Literal(TokenProgress),
    /// The root value is complete; only whitespace may follow.
    Done,
    Finished,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Object {
    KeyOrEnd,
    Key,
    Colon,
    Value,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Array {
    ItemOrEnd,
    Item,
    CommaOrEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Escape {
    None,
    Backslash,
    Unicode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenType {
    True,
    False,
    Null,
}

impl TokenType {
    const fn as_str(&self) -> &'static [u8] {
        match self {
            TokenType::True => b"true",
            TokenType::False => b"false",
            TokenType::Null => b"null",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TokenProgress {
    token_type: TokenType,
    position: usize, // Bytes of the literal matched so far
}

enum TokenStep {
    Partial(TokenProgress),
    Complete(TokenType),
    Mismatch,
}

const fn process_token_char(progress: TokenProgress, ch: u8) -> TokenStep {
    let token_string = progress.token_type.as_str();
    if progress.position < token_string.len() && ch == token_string[progress.position] {
        let position = progress.position + 1;
        if position == token_string.len() {
            TokenStep::Complete(progress.token_type)
        } else {
            TokenStep::Partial(TokenProgress {
                token_type: progress.token_type,
                position,
            })
        }
    } else {
        TokenStep::Mismatch
    }
}

const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn syntax<E>(kind: ErrKind, byte: u8, offset: usize) -> PushParseError<E> {
    SyntaxError::new(kind, byte, offset).into()
}

/// A SAX-style JSON push parser.
///
/// Feed input with [`write`](Self::write) as it becomes available and call
/// [`finish`](Self::finish) once it is exhausted. Any error is terminal: the
/// parser answers [`ParseError::Aborted`] until [`reset`](Self::reset).
pub struct PushParser<S: EventSink> {
    sink: S,
    stack: FrameStack<S::Stack>,
    state: State,
    unicode: UnicodeEscape,
    /// Absolute offset of the next chunk's first byte
    position_offset: usize,
}

impl<S: EventSink> PushParser<S> {
    /// Creates a parser, taking its frame stack from `sink`.
    pub fn new(mut sink: S) -> Self {
        let stack = FrameStack::new(sink.provide_stack());
        Self {
            sink,
            stack,
            state: State::Start,
            unicode: UnicodeEscape::default(),
            position_offset: 0,
        }
    }

    /// Processes a chunk of input data.
    pub fn write(&mut self, data: &[u8]) -> Result<(), PushParseError<S::Error>> {
        let result = self.write_inner(data);
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    /// Signals end of input, flushing a trailing root number.
    pub fn finish(&mut self) -> Result<(), PushParseError<S::Error>> {
        let result = self.finish_inner();
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    /// Discards all parse state and takes a fresh stack from the sink.
    pub fn reset(&mut self) {
        let storage = self.sink.provide_stack();
        self.stack.replace(storage);
        self.state = State::Start;
        self.unicode.reset();
        self.position_offset = 0;
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Destroys the parser and returns the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn fail(&mut self, err: &PushParseError<S::Error>) {
        if let PushParseError::Parse(e) = err {
            log::debug!("push parser failed: {e}");
        }
        self.state = State::Failed;
    }

    fn write_inner(&mut self, data: &[u8]) -> Result<(), PushParseError<S::Error>> {
        if let State::Failed = self.state {
            return Err(ParseError::Aborted.into());
        }
        let mut pos = 0;
        while let Some(&byte) = data.get(pos) {
            let offset = self.position_offset + pos;
            let state = self.state;
            match state {
                State::Start => {
                    self.sink
                        .on_document_begin()
                        .map_err(PushParseError::Handler)?;
                    self.state = State::Root;
                    continue;
                }
                State::String {
                    key,
                    escape: Escape::None,
                } => {
                    pos = self.scan_string(data, pos, key)?;
                    continue;
                }
                State::String {
                    key,
                    escape: Escape::Backslash,
                } => self.escape_char(byte, offset, key)?,
                State::String {
                    key,
                    escape: Escape::Unicode,
                } => self.unicode_digit(byte, offset, key)?,
                State::Number(mut decoder) => match decoder.push(byte) {
                    Ok(Step::Consumed) => self.state = State::Number(decoder),
                    Ok(Step::Terminated) => {
                        // The terminator is handled again in the enclosing state
                        self.end_number(&decoder, byte, offset)?;
                        continue;
                    }
                    Err(kind) => return Err(syntax(kind, byte, offset)),
                },
                State::Literal(progress) => self.literal_char(progress, byte, offset)?,
                State::Failed => return Err(ParseError::Aborted.into()),
                _ if is_whitespace(byte) => {}
                State::Root => self.begin_value(byte, offset, ErrKind::InvalidRoot)?,
                State::Object { expect } => self.object_byte(expect, byte, offset)?,
                State::Array { expect } => self.array_byte(expect, byte, offset)?,
                State::Done | State::Finished => {
                    return Err(syntax(ErrKind::ContentEnded, byte, offset))
                }
            }
            pos += 1;
        }
        self.position_offset += data.len();
        Ok(())
    }

    fn finish_inner(&mut self) -> Result<(), PushParseError<S::Error>> {
        let offset = self.position_offset;
        if let State::Number(decoder) = self.state {
            self.end_number(&decoder, b' ', offset)?;
        }
        match self.state {
            State::Done => {
                self.sink
                    .on_document_end()
                    .map_err(PushParseError::Handler)?;
                self.state = State::Finished;
                Ok(())
            }
            State::Finished => Ok(()),
            State::Failed => Err(ParseError::Aborted.into()),
            State::Start | State::Root => Err(syntax(ErrKind::EmptyStream, b' ', offset)),
            _ => Err(syntax(ErrKind::UnfinishedStream, b' ', offset)),
        }
    }

    /// State to move to once a value is complete.
    fn after_value(&self) -> State {
        match self.stack.top() {
            Some(Frame::Object) => State::Object {
                expect: Object::CommaOrEnd,
            },
            Some(Frame::Array) => State::Array {
                expect: Array::CommaOrEnd,
            },
            None => State::Done,
        }
    }

    fn begin_value(
        &mut self,
        byte: u8,
        offset: usize,
        unexpected: ErrKind,
    ) -> Result<(), PushParseError<S::Error>> {
        self.state = match byte {
            b'{' => {
                self.push_frame(Frame::Object)?;
                self.sink
                    .on_object_begin()
                    .map_err(PushParseError::Handler)?;
                State::Object {
                    expect: Object::KeyOrEnd,
                }
            }
            b'[' => {
                self.push_frame(Frame::Array)?;
                self.sink
                    .on_array_begin()
                    .map_err(PushParseError::Handler)?;
                State::Array {
                    expect: Array::ItemOrEnd,
                }
            }
            b'"' => State::String {
                key: false,
                escape: Escape::None,
            },
            b't' | b'f' | b'n' => {
                let token_type = match byte {
                    b't' => TokenType::True,
                    b'f' => TokenType::False,
                    _ => TokenType::Null,
                };
                State::Literal(TokenProgress {
                    token_type,
                    position: 1,
                })
            }
            b'-' | b'0'..=b'9' => {
                let decoder = NumberDecoder::begin(byte).map_err(|k| syntax(k, byte, offset))?;
                State::Number(decoder)
            }
            _ => return Err(syntax(unexpected, byte, offset)),
        };
        Ok(())
    }

    fn object_byte(
        &mut self,
        expect: Object,
        byte: u8,
        offset: usize,
    ) -> Result<(), PushParseError<S::Error>> {
        match (expect, byte) {
            (Object::KeyOrEnd | Object::Key, b'"') => {
                self.state = State::String {
                    key: true,
                    escape: Escape::None,
                }
            }
            (Object::KeyOrEnd | Object::CommaOrEnd, b'}') => {
                self.close(Frame::Object, byte, offset)?
            }
            (Object::Key, b'}') => return Err(syntax(ErrKind::TrailingComma, byte, offset)),
            (Object::KeyOrEnd | Object::Key, _) => {
                return Err(syntax(ErrKind::ExpectedObjectKey, byte, offset))
            }
            (Object::Colon, b':') => {
                self.state = State::Object {
                    expect: Object::Value,
                }
            }
            (Object::Colon, _) => return Err(syntax(ErrKind::ExpectedColon, byte, offset)),
            (Object::Value, _) => self.begin_value(byte, offset, ErrKind::ExpectedObjectValue)?,
            (Object::CommaOrEnd, b',') => {
                self.state = State::Object {
                    expect: Object::Key,
                }
            }
            (Object::CommaOrEnd, b']') => {
                return Err(syntax(ErrKind::MismatchedDelimiter, byte, offset))
            }
            (Object::CommaOrEnd, _) => return Err(syntax(ErrKind::ExpectedComma, byte, offset)),
        }
        Ok(())
    }

    fn array_byte(
        &mut self,
        expect: Array,
        byte: u8,
        offset: usize,
    ) -> Result<(), PushParseError<S::Error>> {
        match (expect, byte) {
            (Array::ItemOrEnd | Array::CommaOrEnd, b']') => self.close(Frame::Array, byte, offset)?,
            (Array::Item, b']') => return Err(syntax(ErrKind::TrailingComma, byte, offset)),
            (Array::ItemOrEnd | Array::Item, _) => {
                self.begin_value(byte, offset, ErrKind::ExpectedArrayItem)?
            }
            (Array::CommaOrEnd, b',') => {
                self.state = State::Array {
                    expect: Array::Item,
                }
            }
            (Array::CommaOrEnd, b'}') => {
                return Err(syntax(ErrKind::MismatchedDelimiter, byte, offset))
            }
            (Array::CommaOrEnd, _) => return Err(syntax(ErrKind::ExpectedComma, byte, offset)),
        }
        Ok(())
    }

    fn push_frame(&mut self, frame: Frame) -> Result<(), PushParseError<S::Error>> {
        if self.stack.is_full() {
            let depth = self.stack.depth();
            log::debug!("frame stack full at depth {depth}, asking sink to grow it");
            let storage = self.sink.on_stack_grow(depth, 1)?;
            self.stack.grow_into(storage)?;
        }
        self.stack.push(frame)?;
        Ok(())
    }

    fn close(&mut self, kind: Frame, byte: u8, offset: usize) -> Result<(), PushParseError<S::Error>> {
        match self.stack.pop() {
            Some(frame) if frame == kind => {}
            _ => return Err(syntax(ErrKind::MismatchedDelimiter, byte, offset)),
        }
        let notified = match kind {
            Frame::Object => self.sink.on_object_end(),
            Frame::Array => self.sink.on_array_end(),
        };
        notified.map_err(PushParseError::Handler)?;
        self.state = self.after_value();
        Ok(())
    }

    fn end_number(
        &mut self,
        decoder: &NumberDecoder,
        byte: u8,
        offset: usize,
    ) -> Result<(), PushParseError<S::Error>> {
        let number = decoder.finish().map_err(|k| syntax(k, byte, offset))?;
        self.sink
            .on_number(number)
            .map_err(PushParseError::Handler)?;
        self.state = self.after_value();
        Ok(())
    }

    fn literal_char(
        &mut self,
        progress: TokenProgress,
        byte: u8,
        offset: usize,
    ) -> Result<(), PushParseError<S::Error>> {
        match process_token_char(progress, byte) {
            TokenStep::Partial(progress) => self.state = State::Literal(progress),
            TokenStep::Complete(token_type) => {
                let notified = match token_type {
                    TokenType::True => self.sink.on_bool(true),
                    TokenType::False => self.sink.on_bool(false),
                    TokenType::Null => self.sink.on_null(),
                };
                notified.map_err(PushParseError::Handler)?;
                self.state = self.after_value();
            }
            TokenStep::Mismatch => return Err(syntax(ErrKind::InvalidToken, byte, offset)),
        }
        Ok(())
    }

    /// Consumes plain string content starting at `start` and returns the
    /// position of the next unprocessed byte.
    ///
    /// The run up to the next quote, backslash or control byte is delivered as
    /// a single span; a run cut off by the end of the chunk becomes a data span.
    fn scan_string(
        &mut self,
        data: &[u8],
        start: usize,
        key: bool,
    ) -> Result<usize, PushParseError<S::Error>> {
        let offset = self.position_offset + start;
        let rest = data.get(start..).unwrap_or_default();
        if self.unicode.is_pending() {
            // Only the `\u` of a low surrogate may follow a high surrogate
            if let Some(&byte) = rest.first().filter(|&&b| b != b'\\') {
                return Err(syntax(ErrKind::InvalidUnicodeCodepoint, byte, offset));
            }
        }

        let run_len = rest
            .iter()
            .position(|&b| b == b'"' || b == b'\\' || b < 0x20)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(run_len);
        let next = start + run_len + 1;
        match tail.first() {
            None => {
                if !run.is_empty() {
                    self.emit_data(key, run)?;
                }
                Ok(data.len())
            }
            Some(b'"') => {
                let notified = if key {
                    self.sink.on_key_end(run)
                } else {
                    self.sink.on_string_end(run)
                };
                notified.map_err(PushParseError::Handler)?;
                self.state = if key {
                    State::Object {
                        expect: Object::Colon,
                    }
                } else {
                    self.after_value()
                };
                Ok(next)
            }
            Some(b'\\') => {
                if !run.is_empty() {
                    self.emit_data(key, run)?;
                }
                self.state = State::String {
                    key,
                    escape: Escape::Backslash,
                };
                Ok(next)
            }
            Some(&control) => Err(syntax(
                ErrKind::UnescapedControlCharacter,
                control,
                offset + run_len,
            )),
        }
    }

    fn escape_char(&mut self, byte: u8, offset: usize, key: bool) -> Result<(), PushParseError<S::Error>> {
        if byte == b'u' {
            self.unicode.begin();
            self.state = State::String {
                key,
                escape: Escape::Unicode,
            };
            return Ok(());
        }
        if self.unicode.is_pending() {
            return Err(syntax(ErrKind::InvalidUnicodeCodepoint, byte, offset));
        }
        let unescaped =
            simple_escape(byte).ok_or_else(|| syntax(ErrKind::InvalidStringEscape, byte, offset))?;
        self.emit_data(key, &[unescaped])?;
        self.state = State::String {
            key,
            escape: Escape::None,
        };
        Ok(())
    }

    fn unicode_digit(&mut self, byte: u8, offset: usize, key: bool) -> Result<(), PushParseError<S::Error>> {
        match self.unicode.push_hex(byte) {
            Ok(Hex::NeedMore) => return Ok(()),
            Ok(Hex::AwaitingLowSurrogate) => {}
            Ok(Hex::Char(ch)) => {
                let mut utf8_buffer = [0u8; 4];
                let encoded = ch.encode_utf8(&mut utf8_buffer);
                self.emit_data(key, encoded.as_bytes())?;
            }
            Err(kind) => return Err(syntax(kind, byte, offset)),
        }
        self.state = State::String {
            key,
            escape: Escape::None,
        };
        Ok(())
    }

    fn emit_data(&mut self, key: bool, data: &[u8]) -> Result<(), PushParseError<S::Error>> {
        let notified = if key {
            self.sink.on_key_data(data)
        } else {
            self.sink.on_string_data(data)
        };
        notified.map_err(PushParseError::Handler)
    }
}

/// Parses a complete document held in memory and returns the sink.
pub fn parse<S: EventSink>(sink: S, input: &[u8]) -> Result<S, PushParseError<S::Error>> {
    let mut parser = PushParser::new(sink);
    parser.write(input)?;
    parser.finish()?;
    Ok(parser.into_sink())
}
