//! The packed font image and its C source rendering.
//!
//! A [`PackedFont`] is a list of source lines. Data lines carry the actual bytes so the image
//! can be evaluated without going through the text, `#ifdef` directives select between the
//! unicode and the plain variant of the legacy format.

use std::fmt;

/// Preprocessor switch selecting the unicode aware font variant on the device side.
pub const UNICODE_DEFINE: &str = "CONFIG_SSD1306_UNICODE_ENABLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    IfUnicode,
    Else,
    EndIf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Emitted verbatim.
    Comment(String),
    /// Hex byte record, optionally followed by a `// note` comment.
    Data { bytes: Vec<u8>, note: Option<String> },
    Directive(Directive),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Comment(text) => write!(f, "{text}"),
            Line::Data { bytes, note } => {
                write!(f, "   ")?;
                for b in bytes {
                    write!(f, " 0x{b:02X},")?;
                }
                if let Some(note) = note {
                    write!(f, " // {note}")?;
                }
                Ok(())
            }
            Line::Directive(Directive::IfUnicode) => write!(f, "#ifdef {UNICODE_DEFINE}"),
            Line::Directive(Directive::Else) => write!(f, "#else"),
            Line::Directive(Directive::EndIf) => write!(f, "#endif"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFont {
    name: String,
    lines: Vec<Line>,
}

impl PackedFont {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// C identifier of the array.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn comment(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Comment(text.into()));
    }

    pub(crate) fn data(&mut self, bytes: Vec<u8>) {
        self.lines.push(Line::Data { bytes, note: None });
    }

    pub(crate) fn data_with_note(&mut self, bytes: Vec<u8>, note: impl Into<String>) {
        self.lines.push(Line::Data {
            bytes,
            note: Some(note.into()),
        });
    }

    pub(crate) fn directive(&mut self, directive: Directive) {
        self.lines.push(Line::Directive(directive));
    }

    /// The bytes the C compiler sees, with or without the unicode define.
    pub fn to_bytes(&self, unicode: bool) -> Vec<u8> {
        let mut active = Vec::new();
        let mut result = Vec::new();
        for line in &self.lines {
            match line {
                Line::Directive(Directive::IfUnicode) => active.push(unicode),
                Line::Directive(Directive::Else) => {
                    if let Some(top) = active.last_mut() {
                        *top = !*top;
                    }
                }
                Line::Directive(Directive::EndIf) => {
                    active.pop();
                }
                Line::Data { bytes, .. } if active.iter().all(|&a| a) => result.extend_from_slice(bytes),
                _ => {}
            }
        }
        result
    }

    /// Full C source: `preamble` lines (e.g. the demo preview), declaration and array definition.
    pub fn to_source(&self, preamble: &[String]) -> String {
        let mut out = String::new();
        for line in preamble {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("extern const uint8_t {}[] PROGMEM;\n", self.name));
        out.push_str(&format!("const uint8_t {}[] PROGMEM =\n", self.name));
        out.push_str("{\n");
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out.push_str("};\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> PackedFont {
        let mut font = PackedFont::new("sample");
        font.directive(Directive::IfUnicode);
        font.comment("//  type");
        font.data(vec![0x01]);
        font.directive(Directive::Else);
        font.data(vec![0x00]);
        font.directive(Directive::EndIf);
        font.data_with_note(vec![0xAB, 0x0C], "char 'A' (0x0041/65)");
        font.data_with_note(Vec::new(), "char ' ' (0x0020/32)");
        font
    }

    #[test]
    fn test_to_bytes_selects_variant() {
        let font = sample();
        assert_eq!(font.to_bytes(true), vec![0x01, 0xAB, 0x0C]);
        assert_eq!(font.to_bytes(false), vec![0x00, 0xAB, 0x0C]);
    }

    #[test]
    fn test_to_source() {
        let source = sample().to_source(&["// demo".to_string()]);
        assert_eq!(
            source,
            "// demo
extern const uint8_t sample[] PROGMEM;
const uint8_t sample[] PROGMEM =
{
#ifdef CONFIG_SSD1306_UNICODE_ENABLE
//  type
    0x01,
#else
    0x00,
#endif
    0xAB, 0x0C, // char 'A' (0x0041/65)
    // char ' ' (0x0020/32)
};
"
        );
    }
}
