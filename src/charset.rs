//! Character encodings for header and whole-file text decoding.
//!
//! The two formats this crate reads use exactly two encodings: IBM Cp1047
//! (the EBCDIC variant carried by SEG-Y textual headers) and strict 7-bit
//! US-ASCII (LAS well-log files). Both are bundled as explicit decode
//! tables so extraction behaves identically on every platform, with no
//! dependence on a runtime-provided encoding registry.

use std::fmt;

/// A single-byte character encoding understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// IBM Code Page 1047 (EBCDIC, Latin-1 repertoire).
    Ebcdic,
    /// Strict 7-bit US-ASCII; bytes >= 0x80 decode to U+FFFD.
    Ascii,
}

impl Charset {
    /// Resolve a charset label to a bundled encoding.
    ///
    /// Accepts the labels the host formats historically used: `Cp1047`,
    /// `IBM1047`, `EBCDIC`, `US-ASCII`, `ASCII`. Matching is
    /// case-insensitive. Returns `None` for anything else; callers surface
    /// that as [`ExtractError::CharsetUnavailable`] before touching the
    /// stream.
    ///
    /// [`ExtractError::CharsetUnavailable`]: crate::ExtractError::CharsetUnavailable
    pub fn for_label(label: &str) -> Option<Charset> {
        match label.to_ascii_lowercase().as_str() {
            "cp1047" | "ibm1047" | "ibm-1047" | "ebcdic" => Some(Charset::Ebcdic),
            "us-ascii" | "ascii" => Some(Charset::Ascii),
            _ => None,
        }
    }

    /// Canonical label of this charset.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Ebcdic => "Cp1047",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Decode a byte slice to a string under this charset.
    ///
    /// Total: every byte maps to exactly one `char` (undecodable ASCII
    /// bytes become U+FFFD). No whitespace is trimmed; fixed-layout text
    /// blocks are reproduced verbatim.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Charset::Ebcdic => bytes.iter().map(|&b| CP1047[b as usize]).collect(),
            Charset::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b < 0x80 {
                        b as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// IBM Cp1047 to Unicode, indexed by byte value.
///
/// Transcribed from the IBM/ICU ibm-1047_P100-1995 mapping.
#[rustfmt::skip]
const CP1047: [char; 256] = [
    '\u{0000}', '\u{0001}', '\u{0002}', '\u{0003}', '\u{009C}', '\u{0009}', '\u{0086}', '\u{007F}',
    '\u{0097}', '\u{008D}', '\u{008E}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{000E}', '\u{000F}',
    '\u{0010}', '\u{0011}', '\u{0012}', '\u{0013}', '\u{009D}', '\u{0085}', '\u{0008}', '\u{0087}',
    '\u{0018}', '\u{0019}', '\u{0092}', '\u{008F}', '\u{001C}', '\u{001D}', '\u{001E}', '\u{001F}',
    '\u{0080}', '\u{0081}', '\u{0082}', '\u{0083}', '\u{0084}', '\u{000A}', '\u{0017}', '\u{001B}',
    '\u{0088}', '\u{0089}', '\u{008A}', '\u{008B}', '\u{008C}', '\u{0005}', '\u{0006}', '\u{0007}',
    '\u{0090}', '\u{0091}', '\u{0016}', '\u{0093}', '\u{0094}', '\u{0095}', '\u{0096}', '\u{0004}',
    '\u{0098}', '\u{0099}', '\u{009A}', '\u{009B}', '\u{0014}', '\u{0015}', '\u{009E}', '\u{001A}',
    ' ',        '\u{00A0}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E1}', '\u{00E3}', '\u{00E5}',
    '\u{00E7}', '\u{00F1}', '\u{00A2}', '.',        '<',        '(',        '+',        '|',
    '&',        '\u{00E9}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00ED}', '\u{00EE}', '\u{00EF}',
    '\u{00EC}', '\u{00DF}', '!',        '$',        '*',        ')',        ';',        '^',
    '-',        '/',        '\u{00C2}', '\u{00C4}', '\u{00C0}', '\u{00C1}', '\u{00C3}', '\u{00C5}',
    '\u{00C7}', '\u{00D1}', '\u{00A6}', ',',        '%',        '_',        '>',        '?',
    '\u{00F8}', '\u{00C9}', '\u{00CA}', '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}',
    '\u{00CC}', '`',        ':',        '#',        '@',        '\'',       '=',        '"',
    '\u{00D8}', 'a',        'b',        'c',        'd',        'e',        'f',        'g',
    'h',        'i',        '\u{00AB}', '\u{00BB}', '\u{00F0}', '\u{00FD}', '\u{00FE}', '\u{00B1}',
    '\u{00B0}', 'j',        'k',        'l',        'm',        'n',        'o',        'p',
    'q',        'r',        '\u{00AA}', '\u{00BA}', '\u{00E6}', '\u{00B8}', '\u{00C6}', '\u{00A4}',
    '\u{00B5}', '~',        's',        't',        'u',        'v',        'w',        'x',
    'y',        'z',        '\u{00A1}', '\u{00BF}', '\u{00D0}', '[',        '\u{00DE}', '\u{00AE}',
    '\u{00AC}', '\u{00A3}', '\u{00A5}', '\u{00B7}', '\u{00A9}', '\u{00A7}', '\u{00B6}', '\u{00BC}',
    '\u{00BD}', '\u{00BE}', '\u{00DD}', '\u{00A8}', '\u{00AF}', ']',        '\u{00B4}', '\u{00D7}',
    '{',        'A',        'B',        'C',        'D',        'E',        'F',        'G',
    'H',        'I',        '\u{00AD}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00F3}', '\u{00F5}',
    '}',        'J',        'K',        'L',        'M',        'N',        'O',        'P',
    'Q',        'R',        '\u{00B9}', '\u{00FB}', '\u{00FC}', '\u{00F9}', '\u{00FA}', '\u{00FF}',
    '\\',       '\u{00F7}', 'S',        'T',        'U',        'V',        'W',        'X',
    'Y',        'Z',        '\u{00B2}', '\u{00D4}', '\u{00D6}', '\u{00D2}', '\u{00D3}', '\u{00D5}',
    '0',        '1',        '2',        '3',        '4',        '5',        '6',        '7',
    '8',        '9',        '\u{00B3}', '\u{00DB}', '\u{00DC}', '\u{00D9}', '\u{00DA}', '\u{009F}',
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_resolution() {
        assert_eq!(Charset::for_label("Cp1047"), Some(Charset::Ebcdic));
        assert_eq!(Charset::for_label("EBCDIC"), Some(Charset::Ebcdic));
        assert_eq!(Charset::for_label("US-ASCII"), Some(Charset::Ascii));
        assert_eq!(Charset::for_label("ascii"), Some(Charset::Ascii));
        assert_eq!(Charset::for_label("UTF-8"), None);
        assert_eq!(Charset::for_label("Cp037"), None);
    }

    #[test]
    fn ebcdic_alphanumerics() {
        // "C 1" in Cp1047: C=0xC3, space=0x40, 1=0xF1
        assert_eq!(Charset::Ebcdic.decode(&[0xC3, 0x40, 0xF1]), "C 1");
        // Lowercase letters live in the 0x81..0x89 and 0x91..0x99 rows
        assert_eq!(Charset::Ebcdic.decode(&[0x81, 0x89, 0x91, 0x99]), "aijr");
    }

    #[test]
    fn ebcdic_punctuation() {
        assert_eq!(
            Charset::Ebcdic.decode(&[0x4B, 0x6B, 0x7A, 0x7E, 0x60, 0x61]),
            ".,:=-/"
        );
    }

    #[test]
    fn ascii_passthrough_and_replacement() {
        assert_eq!(Charset::Ascii.decode(b"~VERSION 2.0"), "~VERSION 2.0");
        assert_eq!(Charset::Ascii.decode(&[0x41, 0xFF, 0x42]), "A\u{FFFD}B");
    }

    #[test]
    fn decode_is_total_over_all_bytes() {
        let all: Vec<u8> = (0u8..=255).collect();
        assert_eq!(Charset::Ebcdic.decode(&all).chars().count(), 256);
        assert_eq!(Charset::Ascii.decode(&all).chars().count(), 256);
    }
}
