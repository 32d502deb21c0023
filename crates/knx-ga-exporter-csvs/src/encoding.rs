/*!
# Output Encodings

Text encodings the CSV output can be written in. ETS historically expects a Latin-1 family
single-byte file, so ISO-8859-1 is the default and is encoded strictly (code points up to
U+00FF). Every other label is resolved through `encoding_rs`.
*/

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use crate::errors::{ConfigError, EncodeError};

/// Default output encoding label
pub const OUTPUT_ENCODING_DEFAULT: &str = "iso-8859-1";

const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859_1",
    "latin1",
    "latin-1",
    "l1",
];

/// A byte-oriented output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Strict ISO-8859-1.
    Latin1,
    /// Any encoder `encoding_rs` provides (UTF-8, windows-125x, ...).
    Standard(&'static Encoding),
}

impl Default for OutputEncoding {
    fn default() -> Self {
        OutputEncoding::Latin1
    }
}

impl OutputEncoding {
    /// Resolve an encoding label, case-insensitively.
    ///
    /// UTF-16 and the WHATWG replacement encoding have no byte-oriented encoder and are
    /// rejected along with unknown labels.
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        let normalized = label.trim().to_ascii_lowercase();
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(OutputEncoding::Latin1);
        }

        match Encoding::for_label(normalized.as_bytes()) {
            Some(encoding) if encoding.output_encoding() == encoding => {
                Ok(OutputEncoding::Standard(encoding))
            }
            _ => Err(ConfigError::UnknownEncoding(label.to_string())),
        }
    }

    /// Canonical name of the encoding
    pub fn name(&self) -> &'static str {
        match self {
            OutputEncoding::Latin1 => OUTPUT_ENCODING_DEFAULT,
            OutputEncoding::Standard(encoding) => encoding.name(),
        }
    }

    /// Encode `text`, failing on the first character the encoding cannot represent.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        match self {
            OutputEncoding::Latin1 => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                text.chars()
                    .enumerate()
                    .map(|(position, character)| {
                        u8::try_from(u32::from(character))
                            .map_err(|_| self.unencodable(character, position))
                    })
                    .collect::<Result<Vec<u8>, _>>()
                    .map(Cow::Owned)
            }
            OutputEncoding::Standard(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if !had_errors {
                    return Ok(bytes);
                }

                let mut buf = [0u8; 4];
                let (position, character) = text
                    .chars()
                    .enumerate()
                    .find(|(_, c)| encoding.encode(c.encode_utf8(&mut buf)).2)
                    .unwrap_or((0, char::REPLACEMENT_CHARACTER));
                Err(self.unencodable(character, position))
            }
        }
    }

    fn unencodable(&self, character: char, position: usize) -> EncodeError {
        EncodeError {
            encoding: self.name(),
            character,
            code_point: u32::from(character),
            position,
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
