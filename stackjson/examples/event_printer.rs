// Example printing push parser events as chunks of a document arrive

use std::convert::Infallible;

use stackjson::{DecodedNumber, EventSink, Frame, PushParser};

/// Prints events with indentation that follows the nesting
struct EventPrinter {
    indent: usize,
    event_count: usize,
    text: Vec<u8>,
}

impl EventPrinter {
    fn new() -> Self {
        Self {
            indent: 0,
            event_count: 0,
            text: Vec::new(),
        }
    }

    fn indent_str(&self) -> String {
        "  ".repeat(self.indent)
    }

    fn print(&mut self, line: &str) {
        self.event_count += 1;
        println!("{}{}", self.indent_str(), line);
    }

    fn take_text(&mut self, last: &[u8]) -> String {
        self.text.extend_from_slice(last);
        let text = String::from_utf8_lossy(&self.text).into_owned();
        self.text.clear();
        text
    }
}

impl EventSink for EventPrinter {
    type Error = Infallible;
    type Stack = [Frame; 8];

    fn provide_stack(&mut self) -> Self::Stack {
        [Frame::default(); 8]
    }

    fn on_document_begin(&mut self) -> Result<(), Infallible> {
        self.print("StartDocument");
        Ok(())
    }

    fn on_document_end(&mut self) -> Result<(), Infallible> {
        self.print("EndDocument");
        Ok(())
    }

    fn on_object_begin(&mut self) -> Result<(), Infallible> {
        self.print("StartObject");
        self.indent += 1;
        Ok(())
    }

    fn on_object_end(&mut self) -> Result<(), Infallible> {
        self.indent = self.indent.saturating_sub(1);
        self.print("EndObject");
        Ok(())
    }

    fn on_array_begin(&mut self) -> Result<(), Infallible> {
        self.print("StartArray");
        self.indent += 1;
        Ok(())
    }

    fn on_array_end(&mut self) -> Result<(), Infallible> {
        self.indent = self.indent.saturating_sub(1);
        self.print("EndArray");
        Ok(())
    }

    fn on_key_data(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.text.extend_from_slice(data);
        Ok(())
    }

    fn on_key_end(&mut self, data: &[u8]) -> Result<(), Infallible> {
        let key = self.take_text(data);
        self.print(&format!("Key: '{key}'"));
        Ok(())
    }

    fn on_string_data(&mut self, data: &[u8]) -> Result<(), Infallible> {
        self.text.extend_from_slice(data);
        Ok(())
    }

    fn on_string_end(&mut self, data: &[u8]) -> Result<(), Infallible> {
        let s = self.take_text(data);
        self.print(&format!("String: '{s}'"));
        Ok(())
    }

    fn on_number(&mut self, number: DecodedNumber) -> Result<(), Infallible> {
        self.print(&format!("Number: {number}"));
        Ok(())
    }

    fn on_bool(&mut self, value: bool) -> Result<(), Infallible> {
        self.print(&format!("Bool: {value}"));
        Ok(())
    }

    fn on_null(&mut self) -> Result<(), Infallible> {
        self.print("Null");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let json_chunks = [
        br#"{"name": "stack"#.as_slice(),
        br#"json", "version": 1.0, "#.as_slice(),
        br#""features": ["push", "no_std""#.as_slice(),
        br#", "bounded stack"], "escapes": "hello\nworld", "#.as_slice(),
        br#""nested": {"data": [1, 2.5, true, null]}}"#.as_slice(),
    ];

    let full_json = json_chunks.concat();
    println!("Input JSON: {}", std::str::from_utf8(&full_json)?);
    println!("Processing in {} chunks", json_chunks.len());
    println!();

    let mut parser = PushParser::new(EventPrinter::new());
    for chunk in json_chunks {
        parser.write(chunk)?;
    }
    parser.finish()?;

    println!();
    println!("Processed {} events", parser.into_sink().event_count);
    Ok(())
}
