use std::io;
use thiserror::Error;

/// The ways a replay can fail to decode. Every variant is fatal for the file being decoded.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParseError {
    #[error("Expected byte {expected:#04x} at offset {position} but found {}", display_actual(.actual))]
    HeaderMismatch {
        expected: u8,
        actual: Option<u8>,
        position: usize,
    },

    #[error("Session code {0} does not map to a session type")]
    InvalidSessionCode(u8),

    #[error("No null terminator found within slot of {0} bytes")]
    UnterminatedString(usize),

    #[error("Integers of {0} bytes are not supported")]
    UnsupportedWidth(usize),

    #[error("Insufficient data. Expected {0} bytes, but only {1} left")]
    BufferUnderrun(usize, usize),

    #[error("list of size {0} is too large")]
    ListTooLarge(usize),
}

fn display_actual(actual: &Option<u8>) -> String {
    match actual {
        Some(byte) => format!("{:#04x}", byte),
        None => String::from("end of data"),
    }
}

/// A [`ParseError`] annotated with the section of the replay being decoded and where the
/// decoder was when it failed.
#[derive(Error, PartialEq, Debug, Clone)]
#[error("Could not decode replay {section} at offset ({position}): {kind}")]
pub struct DecodeError {
    section: &'static str,
    position: usize,
    #[source]
    kind: ParseError,
}

impl DecodeError {
    pub fn new(section: &'static str, position: usize, kind: ParseError) -> Self {
        DecodeError {
            section,
            position,
            kind,
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Byte offset into the decompressed buffer where decoding stopped
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> &ParseError {
        &self.kind
    }
}

#[derive(Error, Debug)]
#[error("Unable to inflate replay data: {0}")]
pub struct DecompressionError(#[from] pub io::Error);

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
