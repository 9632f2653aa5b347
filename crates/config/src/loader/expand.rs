//! `$VAR` / `${VAR}` substitution against an explicit `EnvVars` table.
//!
//! `dotenvy` resolves substitutions against the process environment, which the
//! context loader must not read. Before parsing, every `$` that dotenvy would
//! expand is replaced with [`SUBSTITUTION_MARK`]; dotenvy then passes it through
//! verbatim and [`expand_substitutions`] resolves it afterwards.
//!
//! Invariants:
//! - A `$` is marked only where dotenvy substitutes: unquoted or inside double
//!   quotes, not escaped, not inside single quotes or comments.
//! - The mark replaces exactly one character, so dotenvy's line splitting and
//!   quote tracking see the same structure as the original text.

/// Private-use character standing in for a substitutable `$`.
pub(super) const SUBSTITUTION_MARK: char = '\u{E000}';

/// Lexer state, mirroring dotenvy's logical-line tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Complete,
    WhiteSpace,
    Escape,
    Weak,
    WeakEscape,
    Strong,
    StrongEscape,
    Comment,
}

impl Lex {
    fn substitutes(self) -> bool {
        matches!(self, Lex::Complete | Lex::WhiteSpace | Lex::Weak)
    }

    fn next(self, c: char) -> Lex {
        match self {
            Lex::WhiteSpace => match c {
                '#' => Lex::Comment,
                '\\' => Lex::Escape,
                '"' => Lex::Weak,
                '\'' => Lex::Strong,
                _ => Lex::Complete,
            },
            Lex::Escape => Lex::Complete,
            Lex::Complete => match c {
                c if c.is_whitespace() && c != '\n' && c != '\r' => Lex::WhiteSpace,
                '\\' => Lex::Escape,
                '"' => Lex::Weak,
                '\'' => Lex::Strong,
                _ => Lex::Complete,
            },
            Lex::Weak => match c {
                '\\' => Lex::WeakEscape,
                '"' => Lex::Complete,
                _ => Lex::Weak,
            },
            Lex::WeakEscape => Lex::Weak,
            Lex::Strong => match c {
                '\\' => Lex::StrongEscape,
                '\'' => Lex::Complete,
                _ => Lex::Strong,
            },
            Lex::StrongEscape => Lex::Strong,
            Lex::Comment => Lex::Comment,
        }
    }
}

/// Replace each substitutable `$` in `contents` with [`SUBSTITUTION_MARK`].
pub(super) fn mark_substitutions(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut state = Lex::Complete;

    for line in contents.split_inclusive('\n') {
        let logical_start = state == Lex::Complete;
        if logical_start && line.trim_start().starts_with('#') {
            out.push_str(line);
            continue;
        }

        for c in line.chars() {
            if c == '$' && state.substitutes() {
                out.push(SUBSTITUTION_MARK);
            } else {
                out.push(c);
            }
            state = state.next(c);
        }

        // A comment ends the logical line; an open quote or escape continues it.
        if state == Lex::Comment {
            state = Lex::Complete;
        }
    }
    out
}

/// Resolve marks in a parsed value.
///
/// `${NAME}` takes everything up to the closing brace; `$NAME` takes the
/// following alphanumeric run. Unknown names expand to the empty string.
pub(super) fn expand_substitutions<'a>(
    value: &str,
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != SUBSTITUTION_MARK {
            out.push(c);
            continue;
        }

        let mut name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if !c.is_alphanumeric() {
                    break;
                }
                name.push(c);
                chars.next();
            }
        }

        if !name.is_empty() {
            if let Some(resolved) = lookup(&name) {
                out.push_str(resolved);
            }
        }
    }
    out
}
