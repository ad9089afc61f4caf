// Literal and comment masking for the regex strategy
//
// Every byte inside a comment or a string/template literal is replaced with a
// space. Newlines survive, so byte offsets and line numbers of the masked text
// match the input exactly.

use crate::extractors::base::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(u8),
}

/// Blank out comments and literal contents, keeping quote delimiters and newlines
pub fn mask_literals(source: &str) -> Result<String> {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        let next = bytes.get(i + 1).copied();

        match state {
            State::Code => match (byte, next) {
                (b'/', Some(b'/')) => {
                    out.extend_from_slice(b"  ");
                    state = State::LineComment;
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    out.extend_from_slice(b"  ");
                    state = State::BlockComment;
                    i += 2;
                    continue;
                }
                (b'\'' | b'"' | b'`', _) => {
                    out.push(byte);
                    state = State::Quoted(byte);
                }
                _ => out.push(byte),
            },
            State::LineComment => {
                if byte == b'\n' {
                    out.push(b'\n');
                    state = State::Code;
                } else {
                    out.push(b' ');
                }
            }
            State::BlockComment => {
                if byte == b'*' && next == Some(b'/') {
                    out.extend_from_slice(b"  ");
                    state = State::Code;
                    i += 2;
                    continue;
                }
                out.push(blank(byte));
            }
            State::Quoted(quote) => {
                if byte == b'\\' {
                    out.push(b' ');
                    if let Some(escaped) = next {
                        out.push(blank(escaped));
                    }
                    i += 2;
                    continue;
                }
                if byte == quote {
                    out.push(byte);
                    state = State::Code;
                } else if byte == b'\n' && quote != b'`' {
                    // Unterminated '...' or "..." ends at the line break
                    out.push(b'\n');
                    state = State::Code;
                } else {
                    out.push(blank(byte));
                }
            }
        }
        i += 1;
    }

    Ok(String::from_utf8(out)?)
}

fn blank(byte: u8) -> u8 {
    if byte == b'\n' { b'\n' } else { b' ' }
}
