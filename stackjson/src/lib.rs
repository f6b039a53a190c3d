// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]

//! A push-style JSON parser with bounded nesting.
//!
//! Input is written to a [`PushParser`] in chunks of any size, and each
//! syntactic element is reported to an [`EventSink`] as soon as it is
//! recognised. Nesting is tracked in a frame stack whose storage the sink
//! supplies, so the depth limit is exactly the length of that storage and the
//! parser itself never allocates.

mod escape;

mod event_sink;
pub use event_sink::EventSink;

mod frame_stack;
pub use frame_stack::{Frame, FrameStack};

mod number;
pub use number::DecodedNumber;

mod parse_error;
pub use parse_error::{ErrKind, ParseError, PushParseError, SyntaxError};

mod push_parser;
pub use push_parser::{parse, PushParser};
