// SPDX-License-Identifier: Apache-2.0

use std::convert::Infallible;
use std::hint::black_box;
use std::marker::PhantomData;

use stackjson::{DecodedNumber, EventSink, Frame};

use super::Backend;
use crate::{BackendError, Operation};

/// Nesting capacity of the bounded-stack backends.
pub const BOUNDED_STACK_FRAMES: usize = 256;

type BoundedStack = [Frame; BOUNDED_STACK_FRAMES];

/// Collects every number of the document as `f64`.
#[derive(Debug, Default)]
pub struct NumberCollector {
    pub numbers: Vec<f64>,
}

impl EventSink for NumberCollector {
    type Error = Infallible;
    type Stack = BoundedStack;

    fn provide_stack(&mut self) -> Self::Stack {
        [Frame::default(); BOUNDED_STACK_FRAMES]
    }

    fn on_number(&mut self, number: DecodedNumber) -> Result<(), Infallible> {
        self.numbers.push(number.as_f64());
        Ok(())
    }
}

/// Accepts every event and keeps nothing.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl EventSink for DiscardSink {
    type Error = Infallible;
    type Stack = BoundedStack;

    fn provide_stack(&mut self) -> Self::Stack {
        [Frame::default(); BOUNDED_STACK_FRAMES]
    }
}

/// Runs the push parser with a fresh `S` for every repetition.
pub(super) struct Bounded<S> {
    name: &'static str,
    sink: PhantomData<fn() -> S>,
}

impl<S> Bounded<S> {
    pub(super) fn new(name: &'static str) -> Self {
        Self {
            name,
            sink: PhantomData,
        }
    }
}

impl<S> Backend for Bounded<S>
where
    S: EventSink<Error = Infallible> + Default,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Parse
    }

    fn parse(&self, text: &[u8], repeat: usize) -> Result<(), BackendError> {
        for _ in 0..repeat {
            let sink = stackjson::parse(S::default(), black_box(text))?;
            black_box(sink);
        }
        Ok(())
    }

    fn serialize(&self, _text: &[u8], _repeat: usize) -> Result<(), BackendError> {
        Err(BackendError::Unsupported {
            backend: self.name,
            operation: Operation::Serialize,
        })
    }
}
