// SPDX-License-Identifier: Apache-2.0

//! The callback interface between [`PushParser`](crate::PushParser) and its consumer.

use crate::{DecodedNumber, Frame, ParseError};

/// Receives parse events in document order.
///
/// Every notification has a no-op default, so a sink only implements the
/// callbacks it cares about. Returning `Err` from any callback aborts the
/// parse and the error comes back to the caller as
/// [`PushParseError::Handler`](crate::PushParseError::Handler).
///
/// Keys and strings arrive as zero or more `*_data` spans followed by one
/// `*_end` span; their concatenation is the decoded text. Spans are raw
/// bytes: a multi-byte UTF-8 character may straddle two spans when the input
/// was written in chunks. No span outlives its callback.
///
/// # Example
///
/// ```rust
/// use stackjson::{DecodedNumber, EventSink, Frame};
///
/// #[derive(Default)]
/// struct Sum(f64);
///
/// impl EventSink for Sum {
///     type Error = ();
///     type Stack = [Frame; 16];
///
///     fn provide_stack(&mut self) -> Self::Stack {
///         [Frame::default(); 16]
///     }
///
///     fn on_number(&mut self, number: DecodedNumber) -> Result<(), ()> {
///         self.0 += number.as_f64();
///         Ok(())
///     }
/// }
///
/// let sum = stackjson::parse(Sum::default(), br#"{"a": [1, 2.5], "b": -0.5}"#).unwrap();
/// assert_eq!(sum.0, 3.0);
/// ```
pub trait EventSink {
    /// Error type returned by the callbacks.
    type Error;
    /// Storage for the frame stack. Its length is the nesting capacity.
    type Stack: AsRef<[Frame]> + AsMut<[Frame]>;

    /// Hands the parser its frame stack. Called once per parse, before any event.
    fn provide_stack(&mut self) -> Self::Stack;

    /// Called when an open bracket would exceed the stack's capacity.
    ///
    /// `depth` frames are live and `requested` more are needed. Returning a
    /// storage longer than `depth` lets the parse continue on it; the default
    /// refuses, which fails the parse with [`ParseError::StackOverflow`].
    fn on_stack_grow(&mut self, depth: usize, requested: usize) -> Result<Self::Stack, ParseError> {
        let _ = requested;
        Err(ParseError::StackOverflow { depth })
    }

    fn on_document_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_document_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_object_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_object_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_array_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_array_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A piece of an object key.
    fn on_key_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    /// The last piece of an object key.
    fn on_key_end(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    /// A piece of a string value.
    fn on_string_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    /// The last piece of a string value.
    fn on_string_end(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn on_number(&mut self, number: DecodedNumber) -> Result<(), Self::Error> {
        let _ = number;
        Ok(())
    }

    fn on_bool(&mut self, value: bool) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    fn on_null(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    type Error = T::Error;
    type Stack = T::Stack;

    fn provide_stack(&mut self) -> Self::Stack {
        (**self).provide_stack()
    }

    fn on_stack_grow(&mut self, depth: usize, requested: usize) -> Result<Self::Stack, ParseError> {
        (**self).on_stack_grow(depth, requested)
    }

    fn on_document_begin(&mut self) -> Result<(), Self::Error> {
        (**self).on_document_begin()
    }

    fn on_document_end(&mut self) -> Result<(), Self::Error> {
        (**self).on_document_end()
    }

    fn on_object_begin(&mut self) -> Result<(), Self::Error> {
        (**self).on_object_begin()
    }

    fn on_object_end(&mut self) -> Result<(), Self::Error> {
        (**self).on_object_end()
    }

    fn on_array_begin(&mut self) -> Result<(), Self::Error> {
        (**self).on_array_begin()
    }

    fn on_array_end(&mut self) -> Result<(), Self::Error> {
        (**self).on_array_end()
    }

    fn on_key_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).on_key_data(data)
    }

    fn on_key_end(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).on_key_end(data)
    }

    fn on_string_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).on_string_data(data)
    }

    fn on_string_end(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).on_string_end(data)
    }

    fn on_number(&mut self, number: DecodedNumber) -> Result<(), Self::Error> {
        (**self).on_number(number)
    }

    fn on_bool(&mut self, value: bool) -> Result<(), Self::Error> {
        (**self).on_bool(value)
    }

    fn on_null(&mut self) -> Result<(), Self::Error> {
        (**self).on_null()
    }
}
