//! The streaming JSON reader
//!
//! The reader is a table driven automaton. Each input byte is classified, and the pair of the
//! current state and the input class selects either a state to enter or an action to perform.
//! Whenever a composite (a container, string, number or literal) begins, the enclosing state is
//! pushed onto a state stack; whenever one completes, its value is pushed onto a value stack, the
//! enclosing state is popped and a synthetic [InputClass::Value] input is processed against it,
//! which folds the completed value into its parent.
//!
//! Input may be supplied in arbitrary chunks through repeated calls to [JsonReader::feed].
use crate::coords::Coords;
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, JsonResult};
use crate::number::{self, Number};
use crate::reader_error;
use crate::tables::{classify, transition, Action, InputClass, State, Transition};
use crate::value::{DynamicValue, Kind};
use log::{debug, trace, warn};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The number of trailing input bytes reported alongside a reader error
const CONTEXT_SIZE: usize = 32;

/// The deepest nesting of maps and arrays accepted unless configured otherwise. Values are
/// compared, cloned, written and dropped recursively, so this bounds the stack they need
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Main JSON reader struct
pub struct JsonReader {
    /// Encoding used when reading from a stream
    encoding: Encoding,
    /// The deepest container nesting accepted
    max_depth: usize,
    /// Set by [JsonReader::start], cleared on failure or completion
    started: bool,
    /// Set once the top-level container has been closed
    valid: bool,
    /// The current automaton state
    state: State,
    /// Enclosing states of the composites currently being read
    states: Vec<State>,
    /// Values under construction. The bottom entry is always the root
    values: Vec<DynamicValue>,
    /// Scratch buffer for string and number text
    buffer: Vec<u8>,
    /// Accumulated `\u` escape digits
    unicode: u32,
    /// A high surrogate waiting for its low half
    high_surrogate: Option<u16>,
    /// Position of the last byte fed
    coords: Coords,
    /// The most recent input bytes, used as error context
    context: VecDeque<u8>,
}

impl Default for JsonReader {
    /// The default encoding is Utf-8
    fn default() -> Self {
        Self::with_encoding(Default::default())
    }
}

impl JsonReader {
    /// Create a new instance of the reader using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        JsonReader {
            encoding,
            max_depth: DEFAULT_MAX_DEPTH,
            started: false,
            valid: false,
            state: State::Start,
            states: vec![],
            values: vec![],
            buffer: vec![],
            unicode: 0,
            high_surrogate: None,
            coords: Coords::default(),
            context: VecDeque::with_capacity(CONTEXT_SIZE),
        }
    }

    /// Limit how deeply maps and arrays may nest. Input exceeding the limit fails with
    /// [Details::DepthLimitExceeded]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Start reading into a given target value. Any reading already in progress is discarded.
    /// A non-empty target of the same container kind as the input is merged into: members are
    /// added or replaced, elements are appended
    pub fn start(&mut self, target: DynamicValue) {
        self.values.clear();
        self.values.push(target);
        self.states.clear();
        self.state = State::Start;
        self.buffer.clear();
        self.unicode = 0;
        self.high_surrogate = None;
        self.coords = Coords::default();
        self.context.clear();
        self.started = true;
        self.valid = false;
        debug!("reader started");
    }

    /// Feed a chunk of input. After a failure the reader must be restarted before it will accept
    /// more input
    pub fn feed(&mut self, bytes: &[u8]) -> JsonResult<()> {
        if !self.started {
            return reader_error!(Details::NotStarted, self.coords);
        }
        for &byte in bytes {
            self.coords.advance(byte);
            if self.context.len() == CONTEXT_SIZE {
                self.context.pop_front();
            }
            self.context.push_back(byte);
            if let Err(mut err) = self.process(classify(byte), byte) {
                self.started = false;
                self.valid = false;
                let (front, back) = self.context.as_slices();
                let near = [front, back].concat();
                err.near = Some(String::from_utf8_lossy(&near).into_owned());
                debug!("reading failed: {}", err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Decode a stream using the configured [Encoding] and feed it through the automaton.
    /// Decoding stops at the first byte sequence that can't be decoded
    pub fn read<B: BufRead>(&mut self, mut reader: B) -> JsonResult<()> {
        let decoders = DecoderSelector::default();
        let chars = decoders.new_decoder(&mut reader, self.encoding);
        let mut encoded = [0u8; 4];
        for c in chars {
            self.feed(c.encode_utf8(&mut encoded).as_bytes())?;
        }
        Ok(())
    }

    /// Complete reading, checking that a top-level object or array was found, and hand back the
    /// populated root value
    pub fn finish(&mut self) -> JsonResult<DynamicValue> {
        if !self.started {
            return reader_error!(Details::NotStarted, self.coords);
        }
        if !self.valid {
            self.started = false;
            return reader_error!(Details::IncompleteDocument, self.coords);
        }
        self.started = false;
        self.valid = false;
        debug!("reader finished after {} bytes", self.coords.absolute);
        match self.values.pop() {
            Some(root) if self.values.is_empty() => Ok(root),
            _ => reader_error!(Details::CorruptState, self.coords),
        }
    }

    /// Read a file into a new value
    pub fn parse_file<PathLike: AsRef<Path>>(&mut self, path: PathLike) -> JsonResult<DynamicValue> {
        match File::open(&path) {
            Ok(f) => {
                self.start(DynamicValue::new());
                self.read(BufReader::new(f))?;
                self.finish()
            }
            Err(_) => reader_error!(Details::InvalidFile),
        }
    }

    /// Read a byte slice into a new value. The bytes are fed straight through the automaton
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> JsonResult<DynamicValue> {
        self.start(DynamicValue::new());
        self.feed(bytes)?;
        self.finish()
    }

    /// Read a string slice into a new value
    pub fn parse_str(&mut self, str: &str) -> JsonResult<DynamicValue> {
        self.parse_bytes(str.as_bytes())
    }

    fn process(&mut self, class: InputClass, byte: u8) -> JsonResult<()> {
        match transition(self.state, class) {
            Transition::Enter(next) => self.enter(next, byte),
            Transition::Act(action) => self.act(action, class, byte),
            Transition::Reject => match self.state {
                State::Escape => {
                    reader_error!(Details::InvalidEscapeSequence(byte), self.coords)
                }
                _ => reader_error!(Details::MalformedInput { found: byte }, self.coords),
            },
        }
    }

    fn enter(&mut self, next: State, byte: u8) -> JsonResult<()> {
        match next {
            State::ObjectStart => self.open_container(Kind::Map)?,
            State::ArrayStart => self.open_container(Kind::Array)?,
            State::ObjectValue => {
                let value = self.pop_value()?;
                let key = self.pop_value()?;
                self.top_value()?.set_member(key.as_string(), value);
            }
            State::ArrayValue => {
                let value = self.pop_value()?;
                self.top_value()?.push(value);
            }
            State::StringStart => {
                self.states.push(self.state);
                self.buffer.clear();
                self.high_surrogate = None;
            }
            State::StringChar => {
                self.flush_surrogate();
                self.buffer.push(byte);
            }
            State::Unicode0 => self.unicode = 0,
            State::Unicode1 | State::Unicode2 | State::Unicode3 => self.push_hex_digit(byte),
            State::Minus | State::Zero | State::Integer => {
                self.states.push(self.state);
                self.buffer.clear();
                self.buffer.push(byte);
            }
            State::NegativeZero
            | State::IntegerDigits
            | State::Fraction
            | State::FractionDigits
            | State::Exponent
            | State::ExponentSign
            | State::ExponentDigits => self.buffer.push(byte),
            State::True1 | State::False1 | State::Null1 => self.states.push(self.state),
            _ => (),
        }
        self.state = next;
        Ok(())
    }

    fn act(&mut self, action: Action, class: InputClass, byte: u8) -> JsonResult<()> {
        match action {
            Action::Whitespace => Ok(()),
            Action::ObjectDone | Action::ArrayDone => {
                self.state = self.pop_state()?;
                trace!("closed container at depth {}", self.states.len());
                if self.state == State::Start {
                    self.state = State::End;
                    self.valid = true;
                    Ok(())
                } else {
                    self.process(InputClass::Value, 0)
                }
            }
            Action::EscapeDone => {
                let decoded = match byte {
                    b'"' | b'\\' | b'/' => byte,
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    other => {
                        return reader_error!(
                            Details::InvalidEscapeSequence(other),
                            self.coords
                        )
                    }
                };
                self.flush_surrogate();
                self.buffer.push(decoded);
                self.state = State::StringChar;
                Ok(())
            }
            Action::UnicodeDone => {
                self.push_hex_digit(byte);
                self.push_code_unit(self.unicode as u16);
                self.state = State::StringChar;
                Ok(())
            }
            Action::StringDone => {
                self.flush_surrogate();
                let text = String::from_utf8_lossy(&self.buffer).into_owned();
                self.complete(DynamicValue::String(text))
            }
            Action::TrueDone => self.complete(DynamicValue::Boolean(true)),
            Action::FalseDone => self.complete(DynamicValue::Boolean(false)),
            Action::NullDone => self.complete(DynamicValue::new()),
            Action::IntegerDone | Action::FloatDone => {
                let integral = action == Action::IntegerDone;
                let number = number::parse_literal(&self.buffer, integral).unwrap_or_else(|| {
                    warn!(
                        "failed to parse numeric literal {:?}",
                        String::from_utf8_lossy(&self.buffer)
                    );
                    Number::default()
                });
                self.complete(DynamicValue::Number(number))?;
                self.process(class, byte)
            }
        }
    }

    /// Begin a new map or array. The root container is the start target itself
    fn open_container(&mut self, kind: Kind) -> JsonResult<()> {
        self.states.push(self.state);
        if self.states.len() > self.max_depth {
            return reader_error!(
                Details::DepthLimitExceeded {
                    limit: self.max_depth
                },
                self.coords
            );
        }
        if self.states.len() != 1 {
            self.values.push(DynamicValue::new());
        }
        if let Some(top) = self.values.last_mut() {
            top.set_kind(kind);
        }
        trace!("opened {} at depth {}", kind, self.states.len());
        Ok(())
    }

    /// Push a completed scalar, return to the enclosing state and fold the value into it
    fn complete(&mut self, value: DynamicValue) -> JsonResult<()> {
        self.values.push(value);
        self.state = self.pop_state()?;
        self.process(InputClass::Value, 0)
    }

    fn pop_state(&mut self) -> JsonResult<State> {
        match self.states.pop() {
            Some(state) => Ok(state),
            None => reader_error!(Details::CorruptState, self.coords),
        }
    }

    fn pop_value(&mut self) -> JsonResult<DynamicValue> {
        match self.values.pop() {
            Some(value) => Ok(value),
            None => reader_error!(Details::CorruptState, self.coords),
        }
    }

    fn top_value(&mut self) -> JsonResult<&mut DynamicValue> {
        match self.values.last_mut() {
            Some(value) => Ok(value),
            None => reader_error!(Details::CorruptState, self.coords),
        }
    }

    fn push_hex_digit(&mut self, byte: u8) {
        let digit = (byte as char).to_digit(16).unwrap_or(0);
        self.unicode = (self.unicode << 4) | digit;
    }

    /// Append a UTF-16 code unit from a `\u` escape, pairing surrogates into a single code point
    fn push_code_unit(&mut self, unit: u16) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush_surrogate();
                self.high_surrogate = Some(unit);
            }
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                    self.push_char(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => self.push_char(char::REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush_surrogate();
                self.push_char(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    /// An unpaired high surrogate becomes U+FFFD
    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.push_char(char::REPLACEMENT_CHARACTER);
        }
    }

    fn push_char(&mut self, c: char) {
        let mut encoded = [0u8; 4];
        self.buffer
            .extend_from_slice(c.encode_utf8(&mut encoded).as_bytes());
    }
}
