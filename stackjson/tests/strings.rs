// SPDX-License-Identifier: Apache-2.0

// String and key delivery: escapes, spans and chunk boundaries
mod common;

use common::{record, record_chunked, record_split, OwnedEvent, Recorder};
use stackjson::{parse, ErrKind, EventSink, Frame, ParseError, PushParseError, PushParser};
use test_log::test;

fn single_string(json: &[u8]) -> String {
    let events = record(json).unwrap();
    match events.as_slice() {
        [OwnedEvent::StartDocument, OwnedEvent::String(s), OwnedEvent::EndDocument] => s.clone(),
        other => panic!("Expected a single string, got {other:?}"),
    }
}

#[test]
fn test_simple_escapes() {
    assert_eq!(
        single_string(br#""a\"b\\c\/d\be\ff\ng\rh\ti""#),
        "a\"b\\c/d\u{8}e\u{c}f\ng\rh\ti"
    );
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(single_string(br#""\u0041\u00e9\u4E2D""#), "Aé中");
    assert_eq!(single_string(br#""x\uD83D\uDE00y""#), "x😀y");
    assert_eq!(single_string(br#""\u0000""#), "\0");
}

#[test]
fn test_raw_utf8_passes_through() {
    assert_eq!(single_string("\"héllo wörld ✓\"".as_bytes()), "héllo wörld ✓");
}

#[test]
fn test_empty_strings_and_keys() {
    assert_eq!(
        record(br#"{"":""}"#).unwrap(),
        vec![
            OwnedEvent::StartDocument,
            OwnedEvent::StartObject,
            OwnedEvent::Key(String::new()),
            OwnedEvent::String(String::new()),
            OwnedEvent::EndObject,
            OwnedEvent::EndDocument
        ]
    );
}

#[test]
fn test_escape_spans_are_separate() {
    let sink = parse(Recorder::<2>::default(), br#""ab\ncd""#).unwrap();
    assert_eq!(
        sink.spans,
        vec![b"ab".to_vec(), b"\n".to_vec(), b"cd".to_vec()]
    );

    let sink = parse(Recorder::<2>::default(), br#""\u00e9""#).unwrap();
    // Decoded character, then an empty end span
    assert_eq!(sink.spans, vec!["é".as_bytes().to_vec(), Vec::new()]);
}

#[test]
fn test_chunk_boundary_flushes_run() {
    let mut parser = PushParser::new(Recorder::<2>::default());
    parser.write(b"\"hel").unwrap();
    parser.write(b"lo\"").unwrap();
    parser.finish().unwrap();
    assert_eq!(
        parser.sink().spans,
        vec![b"hel".to_vec(), b"lo".to_vec()]
    );
}

#[test]
fn test_every_split_position() {
    let json = br#"{"k\u00e9y": ["plain", "esc\"aped\\", "\uD83D\uDE00 pair", "tab\there"], "n": -12.5e1}"#;
    let expected = record(json).unwrap();
    for split in 0..=json.len() {
        assert_eq!(record_split(json, &[split]), Ok(expected.clone()), "split at {split}");
    }
    for first in 0..json.len() {
        for second in first..=json.len() {
            assert_eq!(record_split(json, &[first, second]), Ok(expected.clone()));
        }
    }
}

#[test]
fn test_byte_at_a_time() {
    let json = r#"["Aß東𝄞", "\\\/\b\f\n\r\t"]"#.as_bytes();
    assert_eq!(record_chunked(json, 1), record(json));
}

/// Records where each span points, relative to the input buffer.
struct SpanLocations {
    input: std::ops::Range<usize>,
    inside: Vec<bool>,
}

impl EventSink for SpanLocations {
    type Error = ();
    type Stack = [Frame; 4];

    fn provide_stack(&mut self) -> Self::Stack {
        [Frame::default(); 4]
    }
    fn on_key_end(&mut self, data: &[u8]) -> Result<(), ()> {
        self.on_string_end(data)
    }
    fn on_string_data(&mut self, data: &[u8]) -> Result<(), ()> {
        self.on_string_end(data)
    }
    fn on_string_end(&mut self, data: &[u8]) -> Result<(), ()> {
        let start = data.as_ptr() as usize;
        self.inside
            .push(self.input.contains(&start) && start + data.len() <= self.input.end);
        Ok(())
    }
}

#[test]
fn test_unescaped_spans_borrow_input() {
    let json = br#"{"key": "value", "mixed": "a\tb"}"#;
    let start = json.as_ptr() as usize;
    let sink = SpanLocations {
        input: start..start + json.len(),
        inside: Vec::new(),
    };
    let sink = parse(sink, json).unwrap();
    // key, value, mixed, "a", decoded tab, "b"
    assert_eq!(sink.inside, vec![true, true, true, true, false, true]);
}

fn string_error(json: &[u8]) -> (ErrKind, usize) {
    match record(json) {
        Err(PushParseError::Parse(ParseError::Syntax(e))) => (e.kind(), e.offset()),
        other => panic!("Expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_string_errors() {
    assert_eq!(string_error(b"\"a\nb\""), (ErrKind::UnescapedControlCharacter, 2));
    assert_eq!(string_error(br#""\q""#), (ErrKind::InvalidStringEscape, 2));
    assert_eq!(string_error(br#""\u00z0""#), (ErrKind::InvalidUnicodeEscape, 5));
    // Lone surrogates
    assert_eq!(string_error(br#""\uDC00""#).0, ErrKind::InvalidUnicodeCodepoint);
    assert_eq!(string_error(br#""\uD800\u0041""#).0, ErrKind::InvalidUnicodeCodepoint);
    assert_eq!(string_error(br#""\uD800""#).0, ErrKind::InvalidUnicodeCodepoint);
    assert_eq!(string_error(br#""\uD800A""#).0, ErrKind::InvalidUnicodeCodepoint);
}

#[test]
fn test_surrogate_pair_split_across_chunks() {
    let json = br#""\uD83D\uDE00""#;
    for split in 0..=json.len() {
        assert_eq!(
            record_split(json, &[split]),
            record(json),
            "split at {split}"
        );
    }
}
