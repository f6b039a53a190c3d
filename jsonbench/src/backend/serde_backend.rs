// SPDX-License-Identifier: Apache-2.0

use std::hint::black_box;

use serde::de::IgnoredAny;
use serde_json::Value;

use super::Backend;
use crate::{BackendError, Operation};

/// serde_json building a full `Value` tree.
#[derive(Debug, Default)]
pub struct SerdeValue;

impl Backend for SerdeValue {
    fn name(&self) -> &'static str {
        "serde_json(value)"
    }

    fn parse(&self, text: &[u8], repeat: usize) -> Result<(), BackendError> {
        for _ in 0..repeat {
            let value: Value = serde_json::from_slice(black_box(text))?;
            black_box(value);
        }
        Ok(())
    }

    fn serialize(&self, text: &[u8], repeat: usize) -> Result<(), BackendError> {
        let value: Value = serde_json::from_slice(text)?;
        for _ in 0..repeat {
            let out = serde_json::to_vec(black_box(&value))?;
            black_box(out);
        }
        Ok(())
    }
}

/// serde_json checking syntax without building anything.
#[derive(Debug, Default)]
pub struct SerdeIgnored;

impl Backend for SerdeIgnored {
    fn name(&self) -> &'static str {
        "serde_json(ignored)"
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Parse
    }

    fn parse(&self, text: &[u8], repeat: usize) -> Result<(), BackendError> {
        for _ in 0..repeat {
            let ignored: IgnoredAny = serde_json::from_slice(black_box(text))?;
            black_box(ignored);
        }
        Ok(())
    }

    fn serialize(&self, _text: &[u8], _repeat: usize) -> Result<(), BackendError> {
        Err(BackendError::Unsupported {
            backend: self.name(),
            operation: Operation::Serialize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serialize_round() {
        SerdeValue.serialize(br#"{"a": [1, 2, {"b": null}]}"#, 4).unwrap();
    }

    #[test]
    fn test_ignored_rejects_trailing_content() {
        assert!(matches!(
            SerdeIgnored.parse(b"{} {}", 1),
            Err(BackendError::Serde(_))
        ));
    }
}
