// SPDX-License-Identifier: Apache-2.0

//! Event recording sink shared by the integration tests.

#![allow(dead_code)]

use stackjson::{parse, DecodedNumber, EventSink, Frame, PushParseError, PushParser};

/// Owned event representation for comparison
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedEvent {
    StartDocument,
    EndDocument,
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(String),
    String(String),
    Number(String),
    Bool(bool),
    Null,
}

/// Records every event, joining string spans into whole keys and strings.
pub struct Recorder<const N: usize> {
    pub events: Vec<OwnedEvent>,
    /// Raw spans of the string currently being assembled
    pub spans: Vec<Vec<u8>>,
    pending: Vec<u8>,
}

impl<const N: usize> Default for Recorder<N> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            spans: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<const N: usize> Recorder<N> {
    fn take_text(&mut self, last: &[u8]) -> String {
        self.pending.extend_from_slice(last);
        self.spans.push(last.to_vec());
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8(bytes).expect("decoded text is UTF-8")
    }
}

impl<const N: usize> EventSink for Recorder<N> {
    type Error = ();
    type Stack = [Frame; N];

    fn provide_stack(&mut self) -> Self::Stack {
        [Frame::default(); N]
    }
    fn on_document_begin(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::StartDocument);
        Ok(())
    }
    fn on_document_end(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::EndDocument);
        Ok(())
    }
    fn on_object_begin(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::StartObject);
        Ok(())
    }
    fn on_object_end(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::EndObject);
        Ok(())
    }
    fn on_array_begin(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::StartArray);
        Ok(())
    }
    fn on_array_end(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::EndArray);
        Ok(())
    }
    fn on_key_data(&mut self, data: &[u8]) -> Result<(), ()> {
        self.pending.extend_from_slice(data);
        self.spans.push(data.to_vec());
        Ok(())
    }
    fn on_key_end(&mut self, data: &[u8]) -> Result<(), ()> {
        let key = self.take_text(data);
        self.events.push(OwnedEvent::Key(key));
        Ok(())
    }
    fn on_string_data(&mut self, data: &[u8]) -> Result<(), ()> {
        self.pending.extend_from_slice(data);
        self.spans.push(data.to_vec());
        Ok(())
    }
    fn on_string_end(&mut self, data: &[u8]) -> Result<(), ()> {
        let text = self.take_text(data);
        self.events.push(OwnedEvent::String(text));
        Ok(())
    }
    fn on_number(&mut self, number: DecodedNumber) -> Result<(), ()> {
        self.events.push(OwnedEvent::Number(number.to_string()));
        Ok(())
    }
    fn on_bool(&mut self, value: bool) -> Result<(), ()> {
        self.events.push(OwnedEvent::Bool(value));
        Ok(())
    }
    fn on_null(&mut self) -> Result<(), ()> {
        self.events.push(OwnedEvent::Null);
        Ok(())
    }
}

pub type Events = Result<Vec<OwnedEvent>, PushParseError<()>>;

/// Parses `input` in one write.
pub fn record(input: &[u8]) -> Events {
    parse(Recorder::<32>::default(), input).map(|r| r.events)
}

/// Parses `input`, writing it in chunks of at most `chunk_size` bytes.
pub fn record_chunked(input: &[u8], chunk_size: usize) -> Events {
    let mut parser = PushParser::new(Recorder::<32>::default());
    for chunk in input.chunks(chunk_size.max(1)) {
        parser.write(chunk)?;
    }
    parser.finish()?;
    Ok(parser.into_sink().events)
}

/// Parses `input`, splitting it at each of `splits`.
pub fn record_split(input: &[u8], splits: &[usize]) -> Events {
    let mut parser = PushParser::new(Recorder::<32>::default());
    let mut start = 0;
    for &split in splits {
        let end = split.clamp(start, input.len());
        parser.write(&input[start..end])?;
        start = end;
    }
    parser.write(&input[start..])?;
    parser.finish()?;
    Ok(parser.into_sink().events)
}
