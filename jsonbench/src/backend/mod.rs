// SPDX-License-Identifier: Apache-2.0

//! Interchangeable JSON implementations behind one interface.

mod bounded;
mod serde_backend;

use clap::ValueEnum;

use crate::{BackendError, Operation};

pub use self::bounded::{DiscardSink, NumberCollector, BOUNDED_STACK_FRAMES};
pub use self::serde_backend::{SerdeIgnored, SerdeValue};

/// A JSON implementation under test.
///
/// `parse` and `serialize` each perform `repeat` independent operations on
/// `text`; the driver times one whole call.
pub trait Backend {
    /// Label used in the report.
    fn name(&self) -> &'static str;

    fn supports(&self, operation: Operation) -> bool {
        let _ = operation;
        true
    }

    fn parse(&self, text: &[u8], repeat: usize) -> Result<(), BackendError>;

    /// Parses `text` once, then serializes the result `repeat` times.
    fn serialize(&self, text: &[u8], repeat: usize) -> Result<(), BackendError>;

    fn run(&self, operation: Operation, text: &[u8], repeat: usize) -> Result<(), BackendError> {
        match operation {
            Operation::Parse => self.parse(text, repeat),
            Operation::Serialize => self.serialize(text, repeat),
        }
    }
}

/// The backends that can be selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// serde_json into a `serde_json::Value` tree
    SerdeValue,
    /// serde_json validating into `IgnoredAny`
    SerdeIgnored,
    /// stackjson with a 256-frame stack, collecting every number
    StackNumbers,
    /// stackjson with a 256-frame stack, discarding every event
    StackDiscard,
}

impl BackendKind {
    pub const ALL: [BackendKind; 4] = [
        BackendKind::SerdeValue,
        BackendKind::SerdeIgnored,
        BackendKind::StackNumbers,
        BackendKind::StackDiscard,
    ];

    pub fn build(self) -> Box<dyn Backend> {
        match self {
            BackendKind::SerdeValue => Box::new(SerdeValue),
            BackendKind::SerdeIgnored => Box::new(SerdeIgnored),
            BackendKind::StackNumbers => Box::new(bounded::Bounded::<NumberCollector>::new(
                "stackjson(numbers)",
            )),
            BackendKind::StackDiscard => {
                Box::new(bounded::Bounded::<DiscardSink>::new("stackjson(discard)"))
            }
        }
    }
}

/// Builds backends in the given order.
pub fn build_all(kinds: &[BackendKind]) -> Vec<Box<dyn Backend>> {
    kinds.iter().map(|kind| kind.build()).collect()
}
