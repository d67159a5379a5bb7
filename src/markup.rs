//! Inline lore-markup tokenizer.
//!
//! Turns one block's raw content string into an ordered sequence of literal
//! runs and typed spans for the presentation layer. The tokenizer is total:
//! an unterminated delimiter stays ordinary text, and no input ever fails.
//! Literal runs are handed through untouched for the downstream conventional
//! markdown renderer.

use serde::{Deserialize, Serialize};

/// A named concept tracked independently of any one document. Read-only
/// input to term-link resolution; the parser never creates terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub description: Option<String>,
    /// Id of the entry this term links to, if any.
    pub entry: Option<String>,
}

/// Directory row for a published entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    pub id: String,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    TermLink,
    Term,
    Redacted,
    Glitch,
    Arcane,
    Terminal,
}

/// Recognized delimiter pairs, in priority order. `((...))` is the canonical
/// terminal marker; `[[...]]` belongs to term links exclusively.
const MARKERS: [(Marker, &str, &str); 6] = [
    (Marker::TermLink, "[[", "]]"),
    (Marker::Term, "{{", "}}"),
    (Marker::Redacted, "||", "||"),
    (Marker::Glitch, "%%", "%%"),
    (Marker::Arcane, "::", "::"),
    (Marker::Terminal, "((", "))"),
];

/// Raw delimiter-split output, before directory resolution. Payloads hold
/// the inner text with the delimiters consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Literal(String),
    TermLink(String),
    Term(String),
    Redacted(String),
    Glitch(String),
    Arcane(String),
    Terminal(String),
}

impl Marker {
    fn token(self, inner: &str) -> Token {
        match self {
            Marker::TermLink => Token::TermLink(inner.to_string()),
            Marker::Term => Token::Term(inner.to_string()),
            Marker::Redacted => Token::Redacted(inner.to_string()),
            Marker::Glitch => Token::Glitch(inner.to_string()),
            Marker::Arcane => Token::Arcane(inner.to_string()),
            Marker::Terminal => Token::Terminal(inner.to_string()),
        }
    }
}

/// Split a content string on non-overlapping delimiter pairs. Text outside
/// recognized pairs becomes literal runs; a lone opener with no closer is
/// literal text as well.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some((pos, marker, close)) = next_marker(rest) else {
            literal.push_str(rest);
            break;
        };
        let inner_start = pos + 2;
        match rest[inner_start..].find(close) {
            Some(rel) => {
                literal.push_str(&rest[..pos]);
                flush_literal(&mut literal, &mut tokens);
                tokens.push(marker.token(&rest[inner_start..inner_start + rel]));
                rest = &rest[inner_start + rel + close.len()..];
            }
            None => {
                // Unterminated marker: keep the opener as text and scan on.
                literal.push_str(&rest[..inner_start]);
                rest = &rest[inner_start..];
            }
        }
    }

    flush_literal(&mut literal, &mut tokens);
    tokens
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn next_marker(text: &str) -> Option<(usize, Marker, &'static str)> {
    let mut best: Option<(usize, Marker, &'static str)> = None;
    for (marker, open, close) in MARKERS {
        if let Some(pos) = text.find(open) {
            if best.map_or(true, |(found, _, _)| pos < found) {
                best = Some((pos, marker, close));
            }
        }
    }
    best
}

/// A resolved `[[Name]]` / `[[Name|alias]]` span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermLink {
    /// What the reader sees: the alias when one is given, the name otherwise.
    pub display: String,
    pub name: String,
    /// Whether a term definition with this name exists in the directory.
    pub has_term: bool,
    /// Id of the linked entry, matched by title or via the term's entry id.
    pub entry: Option<String>,
    /// The term's description, for a hover tooltip.
    pub tooltip: Option<String>,
}

/// A typed display span handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    TermLink(TermLink),
    Term { name: String },
    Redacted(String),
    Glitch(String),
    Arcane(String),
    Terminal(String),
}

/// Attach directory lookups to a token stream. Lookups are read-only.
pub fn resolve(tokens: Vec<Token>, terms: &[Term], entries: &[EntryMeta]) -> Vec<Segment> {
    tokens
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => Segment::Literal(text),
            Token::TermLink(raw) => Segment::TermLink(resolve_link(&raw, terms, entries)),
            Token::Term(name) => Segment::Term {
                name: name.trim().to_string(),
            },
            Token::Redacted(text) => Segment::Redacted(text),
            Token::Glitch(text) => Segment::Glitch(text),
            Token::Arcane(text) => Segment::Arcane(text),
            Token::Terminal(text) => Segment::Terminal(text),
        })
        .collect()
}

/// Tokenize and resolve in one step.
pub fn parse(text: &str, terms: &[Term], entries: &[EntryMeta]) -> Vec<Segment> {
    resolve(tokenize(text), terms, entries)
}

fn resolve_link(raw: &str, terms: &[Term], entries: &[EntryMeta]) -> TermLink {
    let (name, alias) = match raw.split_once('|') {
        Some((name, alias)) => (name.trim(), Some(alias.trim())),
        None => (raw.trim(), None),
    };
    let needle = name.to_lowercase();
    let term = terms
        .iter()
        .find(|term| term.name.to_lowercase() == needle);
    let entry = entries
        .iter()
        .find(|entry| entry.title.to_lowercase() == needle)
        .or_else(|| {
            term.and_then(|term| term.entry.as_deref())
                .and_then(|id| entries.iter().find(|entry| entry.id == id))
        });

    let display = match alias {
        Some(alias) if !alias.is_empty() => alias,
        _ => name,
    };

    TermLink {
        display: display.to_string(),
        name: name.to_string(),
        has_term: term.is_some(),
        entry: entry.map(|entry| entry.id.clone()),
        tooltip: term.and_then(|term| term.description.clone()),
    }
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod markup_tests;
