//! License header detection and generation.

use std::path::Path;

use regex::Regex;

lazy_static::lazy_static! {
    static ref COPYRIGHT_YEARS: Regex =
        Regex::new(r"Copyright\s*(?:\([cC]\)|C\s)?\s*(\d{4}(?:\s*[-,]\s*\d{4})*)").unwrap();
}

/// Lines searched for an existing copyright and block opener.
const SEARCH_LINES: usize = 10;

/// A block must open within these lines to be replaced.
const MAX_BLOCK_START: usize = 6;

const INDENT: &str = "    ";

const MIT_LICENSE: &[&str] = &[
    "MIT License",
    "",
    "{COPYRIGHT}",
    "",
    "Permission is hereby granted, free of charge, to any person obtaining a copy",
    "of this software and associated documentation files (the \"Software\"), to deal",
    "in the Software without restriction, including without limitation the rights",
    "to use, copy, modify, merge, publish, distribute, sublicense, and/or sell",
    "copies of the Software, and to permit persons to whom the Software is",
    "furnished to do so, subject to the following conditions:",
    "",
    "The above copyright notice and this permission notice shall be included in all",
    "copies or substantial portions of the Software.",
    "",
    "THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR",
    "IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,",
    "FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE",
    "AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER",
    "LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,",
    "OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE",
    "SOFTWARE.",
];

/// Comment syntax of a stamped file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.c .cpp .h .inl`, `/* */` blocks
    CFamily,
    /// `.py`, `""" """` blocks
    Python,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "py" => Some(Self::Python),
            "c" | "cpp" | "h" | "inl" => Some(Self::CFamily),
            _ => None,
        }
    }

    fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::CFamily => ("/*", "*/"),
            Self::Python => ("\"\"\"", "\"\"\""),
        }
    }
}

/// Year expression of the first copyright line in the leading lines, e.g. `2018-2020`.
pub fn find_copyright_years(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(SEARCH_LINES)
        .find_map(|line| COPYRIGHT_YEARS.captures(line))
        .map(|caps| caps[1].to_string())
}

/// Extends a year expression so it ends with `year`.
///
/// `2019` becomes `2019-2020` and `2017-2019` becomes `2017-2020` when `year` is 2020,
/// older expressions get `,2020` appended.
pub fn update_years(years: &str, year: i32) -> String {
    let current = year.to_string();
    let last = (year - 1).to_string();
    if years.ends_with(&current) {
        years.to_string()
    } else if let Some(head) = years.strip_suffix(&format!("-{last}")) {
        format!("{head}-{current}")
    } else if years.ends_with(&last) {
        format!("{years}-{current}")
    } else {
        format!("{years},{current}")
    }
}

fn is_opener(line: &str) -> bool {
    matches!(line, "/*" | "#" | "\"\"\"")
}

fn is_closer(lines: &[&str], i: usize) -> bool {
    let next_blank = lines.get(i + 1).is_some_and(|next| next.is_empty());
    match lines[i] {
        "*/" | " */" => true,
        "#" | "\"\"\"" => next_blank,
        _ => false,
    }
}

/// Line range (inclusive) of the leading comment block holding the license.
pub fn find_block(lines: &[&str]) -> Option<(usize, usize)> {
    let mut start = None;
    for (i, line) in lines.iter().enumerate() {
        match start {
            None if i > SEARCH_LINES => return None,
            None if is_opener(line) => start = Some(i),
            Some(s) if s < MAX_BLOCK_START && is_closer(lines, i) => return Some((s, i)),
            _ => {}
        }
    }
    None
}

/// License comment block for `copyright`, e.g. `Copyright 2018-2020 (C) Alexey Dynda`.
pub fn license_block(kind: FileKind, copyright: &str) -> Vec<String> {
    let (open, close) = kind.delimiters();
    let mut block = vec![open.to_string()];
    block.extend(MIT_LICENSE.iter().map(|line| match *line {
        "" => String::new(),
        "{COPYRIGHT}" => format!("{INDENT}{copyright}"),
        line => format!("{INDENT}{line}"),
    }));
    block.push(close.to_string());
    block
}

/// Settings of one stamping run.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub holder: String,
    pub year: i32,
    /// Rewrite headers of unmodified files too
    pub force: bool,
}

impl Stamp {
    /// Returns the new text of a file, `None` when it stays as it is.
    ///
    /// `modified` tells whether the file changed since the last run. Files with a license block
    /// are only rewritten when modified or forced, the block is then replaced with one carrying
    /// the updated years. Files without a block get a new header at the top.
    pub fn apply(&self, text: &str, kind: FileKind, modified: bool) -> Option<String> {
        let lines: Vec<&str> = text.lines().collect();
        let years = find_copyright_years(&lines);
        let block = years.as_ref().and_then(|_| find_block(&lines));
        if block.is_some() && !modified && !self.force {
            return None;
        }

        let years = years.map_or_else(|| self.year.to_string(), |years| update_years(&years, self.year));
        let mut header = license_block(kind, &format!("Copyright {years} (C) {}", self.holder));
        let (keep, resume) = if let Some((start, end)) = block {
            (start, end + 1)
        } else {
            header.push(String::new());
            let at = usize::from(kind == FileKind::Python && lines.first().is_some_and(|line| line.starts_with('#')));
            (at, at)
        };

        let mut result = lines[..keep]
            .iter()
            .map(ToString::to_string)
            .chain(header)
            .chain(lines[resume..].iter().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join("\n");
        result.push('\n');
        (result != text).then_some(result)
    }
}
