//! Rich Text Format stripping.
//!
//! Converts RTF to plain text for the block parser. Emphasis is discarded:
//! bold control words are skipped like any other formatting.
//!
//! | Input | Output |
//! |-------|--------|
//! | `\par`, `\line`, `\` + newline | newline |
//! | `\tab` | tab |
//! | `\'hh` | Windows-1252 character |
//! | `\uN` | Unicode scalar N, then `\ucN` fallback characters skipped |
//! | `\\`, `\{`, `\}` | literal character |
//! | `{\*\dest …}` and known destinations | dropped |

use quiz_application::ReadError;
use std::path::Path;

/// Destinations whose content is never document text
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "headerl",
    "headerr",
    "headerf",
    "footer",
    "footerl",
    "footerr",
    "footerf",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
    "xmlnstbl",
    "themedata",
    "colorschememapping",
    "datastore",
    "latentstyles",
    "object",
    "fldinst",
    "filetbl",
    "revtbl",
];

/// Windows-1252 code points for bytes 0x80..=0x9F
const CP1252_HIGH: [char; 32] = [
    '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8d}', 'Ž', '\u{8f}',
    '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\u{9d}', 'ž', 'Ÿ',
];

/// Read an RTF file and strip it to plain text
pub fn read_rtf(path: &Path) -> Result<String, ReadError> {
    let bytes = std::fs::read(path).map_err(|e| ReadError::Io(e.to_string()))?;
    Ok(strip_rtf(&decode_ansi(bytes)))
}

/// Decode RTF source bytes.
///
/// RTF is nominally 7-bit, but writers often emit raw 8-bit text in the
/// document code page. Valid UTF-8 is kept as is; anything else is read as
/// Windows-1252.
fn decode_ansi(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        },
        Err(e) => e.into_bytes().into_iter().map(cp1252).collect(),
    }
}

#[derive(Debug, Clone, Copy)]
struct Group {
    skip: bool,
    unicode_fallback: usize,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            skip: false,
            unicode_fallback: 1,
        }
    }
}

fn emit(out: &mut String, group: &Group, pending_fallback: &mut usize, ch: char) {
    if *pending_fallback > 0 {
        *pending_fallback -= 1;
    } else if !group.skip {
        out.push(ch);
    }
}

fn cp1252(byte: u8) -> char {
    match byte {
        0x80..=0x9f => CP1252_HIGH[(byte - 0x80) as usize],
        _ => char::from(byte),
    }
}

/// Strip RTF markup, keeping the text content.
pub fn strip_rtf(rtf: &str) -> String {
    let chars: Vec<char> = rtf.chars().collect();
    let mut out = String::with_capacity(rtf.len() / 2);
    let mut stack: Vec<Group> = Vec::new();
    let mut group = Group::default();
    // Fallback characters still to drop after a `\u` escape
    let mut pending_fallback = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '{' => {
                stack.push(group);
                pending_fallback = 0;
                i += 1;
            }
            '}' => {
                group = stack.pop().unwrap_or_default();
                pending_fallback = 0;
                i += 1;
            }
            '\r' | '\n' => i += 1,
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    break;
                };
                match next {
                    '\\' | '{' | '}' => {
                        emit(&mut out, &group, &mut pending_fallback, next);
                        i += 2;
                    }
                    '\r' | '\n' => {
                        emit(&mut out, &group, &mut pending_fallback, '\n');
                        i += 2;
                    }
                    '*' => {
                        group.skip = true;
                        i += 2;
                    }
                    '~' => {
                        emit(&mut out, &group, &mut pending_fallback, '\u{a0}');
                        i += 2;
                    }
                    '_' => {
                        emit(&mut out, &group, &mut pending_fallback, '-');
                        i += 2;
                    }
                    '\'' => {
                        let hex: String = chars.iter().skip(i + 2).take(2).collect();
                        if hex.len() == 2
                            && let Ok(byte) = u8::from_str_radix(&hex, 16)
                        {
                            emit(&mut out, &group, &mut pending_fallback, cp1252(byte));
                        }
                        i += 2 + hex.len();
                    }
                    c if c.is_ascii_alphabetic() => {
                        let start = i + 1;
                        let mut end = start;
                        while end < chars.len() && chars[end].is_ascii_alphabetic() {
                            end += 1;
                        }
                        let word: String = chars[start..end].iter().collect();

                        let param_start = end;
                        if end < chars.len() && chars[end] == '-' {
                            end += 1;
                        }
                        while end < chars.len() && chars[end].is_ascii_digit() {
                            end += 1;
                        }
                        let param: Option<i32> = chars[param_start..end]
                            .iter()
                            .collect::<String>()
                            .parse()
                            .ok();
                        if end < chars.len() && chars[end] == ' ' {
                            end += 1;
                        }
                        i = end;

                        match word.as_str() {
                            "par" | "line" | "sect" | "page" => {
                                emit(&mut out, &group, &mut pending_fallback, '\n')
                            }
                            "tab" => emit(&mut out, &group, &mut pending_fallback, '\t'),
                            "emdash" => emit(&mut out, &group, &mut pending_fallback, '—'),
                            "endash" => emit(&mut out, &group, &mut pending_fallback, '–'),
                            "bullet" => emit(&mut out, &group, &mut pending_fallback, '•'),
                            "lquote" => emit(&mut out, &group, &mut pending_fallback, '‘'),
                            "rquote" => emit(&mut out, &group, &mut pending_fallback, '’'),
                            "ldblquote" => emit(&mut out, &group, &mut pending_fallback, '“'),
                            "rdblquote" => emit(&mut out, &group, &mut pending_fallback, '”'),
                            "uc" => group.unicode_fallback = param.unwrap_or(1).max(0) as usize,
                            "u" => {
                                if let Some(code) = param {
                                    let code = if code < 0 { code + 65536 } else { code };
                                    if let Some(c) = char::from_u32(code as u32) {
                                        emit(&mut out, &group, &mut pending_fallback, c);
                                    }
                                    pending_fallback = group.unicode_fallback;
                                }
                            }
                            w if SKIPPED_DESTINATIONS.contains(&w) => group.skip = true,
                            _ => {}
                        }
                    }
                    _ => i += 2,
                }
            }
            _ => {
                emit(&mut out, &group, &mut pending_fallback, ch);
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_formatting() {
        let rtf = r"{\rtf1\ansi{\fonttbl{\f0 Arial;}}\f0\fs24 What is 2 + 2?\par
a) \b 4\b0\par
b) 5\par
\par
Answer Feedback: four}";
        assert_eq!(
            strip_rtf(rtf),
            "What is 2 + 2?\na) 4\nb) 5\n\nAnswer Feedback: four"
        );
    }

    #[test]
    fn test_ignorable_destination_is_dropped() {
        let rtf = r"{\rtf1{\*\generator Riched20;}{\info{\author Me}}Hello\par}";
        assert_eq!(strip_rtf(rtf), "Hello\n");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(strip_rtf(r"{\rtf1 caf\'e9 \{x\} a\\b}"), "café {x} a\\b");
        assert_eq!(strip_rtf(r"{\rtf1 \'93quoted\'94}"), "“quoted”");
        assert_eq!(strip_rtf(r"{\rtf1 a\tab b}"), "a\tb");
    }

    #[test]
    fn test_unicode_with_fallback() {
        assert_eq!(strip_rtf(r"{\rtf1\uc1 \u8364?5}"), "€5");
        assert_eq!(strip_rtf(r"{\rtf1\uc1 \u-3913?}"), "\u{f0b7}");
        assert_eq!(strip_rtf(r"{\rtf1\uc0 \u233 x}"), "éx");
    }

    #[test]
    fn test_raw_ansi_bytes_are_read_as_cp1252() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.rtf");
        let mut bytes = br"{\rtf1\ansi Caf".to_vec();
        bytes.extend([0xe9, b' ', 0x93, b'o', b'k', 0x94, b'}']);
        std::fs::write(&path, bytes).unwrap();
        assert_eq!(read_rtf(&path).unwrap(), "Café “ok”");
    }

    #[test]
    fn test_utf8_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.rtf");
        std::fs::write(&path, "\u{feff}{\\rtf1 Qué}").unwrap();
        assert_eq!(read_rtf(&path).unwrap(), "Qué");
    }

    #[test]
    fn test_unbalanced_input_does_not_panic() {
        assert_eq!(strip_rtf(r"}}plain\"), "plain");
        assert_eq!(strip_rtf(r"{\rtf1 \'4"), "");
    }
}
