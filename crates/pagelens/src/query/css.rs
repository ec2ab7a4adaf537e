//! CSS selector subset
//!
//! Supports tag/universal selectors, `#id`, `.class`, attribute selectors
//! (`[attr]`, `=`, `^=`, `$=`, `*=`, `~=`), the descendant and child
//! combinators, and comma-separated groups. Anything else fails to parse,
//! and an unparseable selector resolves to nothing, mirroring how an
//! invalid selector behaves in a real query API.

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone)]
pub(crate) struct SelectorList {
    complexes: Vec<ComplexSelector>,
}

#[derive(Debug, Clone)]
struct ComplexSelector {
    /// Compounds left to right; `combinators[i]` sits before `compounds[i + 1]`
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone)]
struct Compound {
    tag: Option<String>,
    parts: Vec<SimpleSelector>,
}

#[derive(Debug, Clone)]
enum SimpleSelector {
    Id(String),
    Class(String),
    Attr {
        name: String,
        op: Option<AttrOp>,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    Equals,
    Prefix,
    Suffix,
    Contains,
    Word,
}

/// Parse a selector; `None` when it uses unsupported syntax
pub(crate) fn parse(selector: &str) -> Option<SelectorList> {
    let mut complexes = Vec::new();
    for group in split_top_level(selector, ',') {
        let group = group.trim();
        if group.is_empty() {
            return None;
        }
        complexes.push(parse_complex(group)?);
    }
    if complexes.is_empty() {
        return None;
    }
    Some(SelectorList { complexes })
}

/// All elements under `root` matching the selector, in document order
pub(crate) fn select_all(doc: &Document, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::new();
    for node in doc.subtree(root) {
        if doc.element(node).is_none() {
            continue;
        }
        let matched = list
            .complexes
            .iter()
            .any(|complex| matches_complex(doc, node, complex));
        if matched && !out.contains(&node) {
            out.push(node);
        }
    }
    out
}

fn matches_complex(doc: &Document, node: NodeId, complex: &ComplexSelector) -> bool {
    let Some((rightmost, rest)) = complex.compounds.split_last() else {
        return false;
    };
    if !matches_compound(doc, node, rightmost) {
        return false;
    }
    match_left(doc, node, rest, &complex.combinators)
}

/// Match the remaining compounds against ancestors, right to left
fn match_left(
    doc: &Document,
    node: NodeId,
    compounds: &[Compound],
    combinators: &[Combinator],
) -> bool {
    let Some((compound, prev_compounds)) = compounds.split_last() else {
        return true;
    };
    let Some((combinator, prev_combinators)) = combinators.split_last() else {
        return true;
    };
    match combinator {
        Combinator::Child => {
            let Some(parent) = doc.parent(node) else {
                return false;
            };
            matches_compound(doc, parent, compound)
                && match_left(doc, parent, prev_compounds, prev_combinators)
        }
        Combinator::Descendant => {
            let mut current = doc.parent(node);
            while let Some(ancestor) = current {
                if matches_compound(doc, ancestor, compound)
                    && match_left(doc, ancestor, prev_compounds, prev_combinators)
                {
                    return true;
                }
                current = doc.parent(ancestor);
            }
            false
        }
    }
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    if let Some(tag) = &compound.tag
        && el.tag != *tag
    {
        return false;
    }
    compound.parts.iter().all(|part| match part {
        SimpleSelector::Id(id) => el.id() == Some(id.as_str()),
        SimpleSelector::Class(class) => el.classes().any(|c| c == class),
        SimpleSelector::Attr { name, op, value } => match (el.attr(name), op) {
            (Some(_), None) => true,
            (Some(actual), Some(AttrOp::Equals)) => actual == value,
            (Some(actual), Some(AttrOp::Prefix)) => actual.starts_with(value.as_str()),
            (Some(actual), Some(AttrOp::Suffix)) => actual.ends_with(value.as_str()),
            (Some(actual), Some(AttrOp::Contains)) => actual.contains(value.as_str()),
            (Some(actual), Some(AttrOp::Word)) => {
                actual.split_whitespace().any(|word| word == value)
            }
            (None, _) => false,
        },
    })
}

/// Split on a separator at bracket depth zero, outside quotes
fn split_top_level(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '\'' | '"' => {
                if quote == Some(ch) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(ch);
                }
            }
            '[' if quote.is_none() => depth += 1,
            ']' if quote.is_none() => depth = depth.saturating_sub(1),
            c if c == separator && quote.is_none() && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_complex(s: &str) -> Option<ComplexSelector> {
    if s.trim_start().starts_with('>') {
        return None;
    }

    let mut compound_strings: Vec<(Combinator, String)> = Vec::new();
    let mut buf = String::new();
    let mut depth = 0usize;
    let mut next = Combinator::Descendant;
    for ch in s.chars() {
        if depth == 0 && (ch.is_whitespace() || ch == '>') {
            if !buf.is_empty() {
                compound_strings.push((next, std::mem::take(&mut buf)));
                next = Combinator::Descendant;
            }
            if ch == '>' {
                next = Combinator::Child;
            }
            continue;
        }
        if ch == '[' {
            depth += 1;
        } else if ch == ']' {
            depth = depth.saturating_sub(1);
        }
        buf.push(ch);
    }
    if !buf.is_empty() {
        compound_strings.push((next, buf));
    }
    if compound_strings.is_empty() {
        return None;
    }

    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    for (i, (combinator, compound)) in compound_strings.iter().enumerate() {
        if i > 0 {
            combinators.push(*combinator);
        }
        compounds.push(parse_compound(compound)?);
    }
    Some(ComplexSelector {
        compounds,
        combinators,
    })
}

fn parse_compound(s: &str) -> Option<Compound> {
    let mut tag = None;
    let mut parts = Vec::new();
    let mut i = 0usize;

    let tag_end = s[..]
        .char_indices()
        .find(|&(_, c)| c == '#' || c == '.' || c == '[')
        .map_or(s.len(), |(pos, _)| pos);
    if tag_end > 0 {
        let candidate = &s[..tag_end];
        if candidate != "*" {
            if !candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return None;
            }
            tag = Some(candidate.to_ascii_lowercase());
        }
        i = tag_end;
    }

    while i < s.len() {
        let rest = &s[i..];
        let Some(ch) = rest.chars().next() else {
            break;
        };
        match ch {
            '#' | '.' => {
                let body = &rest[1..];
                let end = body
                    .char_indices()
                    .find(|&(_, c)| c == '#' || c == '.' || c == '[')
                    .map_or(body.len(), |(pos, _)| pos);
                let name = &body[..end];
                if name.is_empty() {
                    return None;
                }
                parts.push(if ch == '#' {
                    SimpleSelector::Id(name.to_string())
                } else {
                    SimpleSelector::Class(name.to_string())
                });
                i += 1 + end;
            }
            '[' => {
                let close = rest.find(']')?;
                parts.push(parse_attr(&rest[1..close])?);
                i += close + 1;
            }
            _ => return None,
        }
    }

    if tag.is_none() && parts.is_empty() {
        return None;
    }
    Some(Compound { tag, parts })
}

fn parse_attr(inner: &str) -> Option<SimpleSelector> {
    const OPS: &[(&str, AttrOp)] = &[
        ("^=", AttrOp::Prefix),
        ("$=", AttrOp::Suffix),
        ("*=", AttrOp::Contains),
        ("~=", AttrOp::Word),
        ("=", AttrOp::Equals),
    ];
    for (token, op) in OPS {
        if let Some(pos) = inner.find(token) {
            let name = inner[..pos].trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let raw = inner[pos + token.len()..].trim();
            let value = raw
                .strip_prefix('\'')
                .and_then(|v| v.strip_suffix('\''))
                .or_else(|| raw.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
                .unwrap_or(raw)
                .to_string();
            return Some(SimpleSelector::Attr {
                name,
                op: Some(*op),
                value,
            });
        }
    }
    let name = inner.trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    Some(SimpleSelector::Attr {
        name,
        op: None,
        value: String::new(),
    })
}
