//! XPath subset
//!
//! Supports absolute paths (`/main/article`), descendant steps
//! (`//button`), the wildcard node test, positional predicates (`[2]`),
//! attribute predicates (`[@id]`, `[@id='content']`), and top-level `|`
//! unions. A rooted path matches its first step anywhere below the
//! document root, so the semantic paths emitted by the outline snapshot
//! (`/main[@id='content']/article[2]`) resolve without spelling out the
//! `html/body` prefix. Invalid expressions resolve to nothing.

use crate::dom::{Document, NodeId};

/// First element matched by the expression, honoring union branch order
pub(crate) fn select_first(doc: &Document, expr: &str) -> Option<NodeId> {
    for branch in split_union(expr) {
        if let Some(node) = eval_path(doc, branch.trim()).into_iter().next() {
            return Some(node);
        }
    }
    None
}

/// All elements matched by the expression; union branches concatenate
pub(crate) fn select_all(doc: &Document, expr: &str) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::new();
    for branch in split_union(expr) {
        for node in eval_path(doc, branch.trim()) {
            if !out.contains(&node) {
                out.push(node);
            }
        }
    }
    out
}

/// Split an expression on `|` at bracket depth zero, outside quotes
pub(crate) fn split_union(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, ch) in expr.char_indices() {
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
            '|' if quote.is_none() && depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

#[derive(Debug, Clone)]
struct Step {
    descendant: bool,
    tag: String,
    predicates: Vec<Predicate>,
}

#[derive(Debug, Clone)]
enum Predicate {
    Position(usize),
    HasAttr(String),
    AttrEquals(String, String),
}

fn eval_path(doc: &Document, expr: &str) -> Vec<NodeId> {
    let Some(steps) = parse_path(expr) else {
        return Vec::new();
    };

    let mut context = vec![doc.root()];
    for step in &steps {
        let mut next: Vec<NodeId> = Vec::new();
        for &ctx in &context {
            let candidates: Vec<NodeId> = if step.descendant {
                doc.subtree(ctx)
                    .into_iter()
                    .skip(1)
                    .filter(|&n| tag_matches(doc, n, &step.tag))
                    .collect()
            } else {
                doc.children(ctx)
                    .iter()
                    .copied()
                    .filter(|&n| tag_matches(doc, n, &step.tag))
                    .collect()
            };
            for node in apply_predicates(doc, candidates, &step.predicates) {
                if !next.contains(&node) {
                    next.push(node);
                }
            }
        }
        context = next;
        if context.is_empty() {
            break;
        }
    }
    context
}

fn tag_matches(doc: &Document, node: NodeId, tag: &str) -> bool {
    match doc.tag(node) {
        Some(actual) => tag == "*" || actual == tag,
        None => false,
    }
}

fn apply_predicates(doc: &Document, mut list: Vec<NodeId>, predicates: &[Predicate]) -> Vec<NodeId> {
    for predicate in predicates {
        list = match predicate {
            Predicate::Position(n) => list.into_iter().skip(n - 1).take(1).collect(),
            Predicate::HasAttr(name) => list
                .into_iter()
                .filter(|&id| doc.has_attr(id, name))
                .collect(),
            Predicate::AttrEquals(name, value) => list
                .into_iter()
                .filter(|&id| doc.attr(id, name) == Some(value.as_str()))
                .collect(),
        };
    }
    list
}

fn parse_path(expr: &str) -> Option<Vec<Step>> {
    let s = expr.trim();
    if !s.starts_with('/') {
        return None;
    }

    let mut steps = Vec::new();
    let mut rest = s;
    let mut first = true;
    while !rest.is_empty() {
        let descendant = if let Some(stripped) = rest.strip_prefix("//") {
            rest = stripped;
            true
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
            first
        } else {
            return None;
        };

        let end = find_step_end(rest);
        if end == 0 {
            return None;
        }
        steps.push(parse_step(&rest[..end], descendant)?);
        rest = &rest[end..];
        first = false;
    }

    if steps.is_empty() { None } else { Some(steps) }
}

/// Length of the step prefix: up to the next `/` outside brackets/quotes
fn find_step_end(s: &str) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
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
            '/' if quote.is_none() && depth == 0 => return i,
            _ => {}
        }
    }
    s.len()
}

fn parse_step(s: &str, descendant: bool) -> Option<Step> {
    let s = s.trim();
    let (name, mut rest) = match s.find('[') {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (s, ""),
    };
    let name = name.trim();
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*')
    {
        return None;
    }

    let mut predicates = Vec::new();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return None;
        }
        let close = find_predicate_end(rest)?;
        predicates.push(parse_predicate(rest[1..close].trim())?);
        rest = &rest[close + 1..];
    }

    Some(Step {
        descendant,
        tag: name.to_ascii_lowercase(),
        predicates,
    })
}

/// Index of the `]` closing the predicate starting at `s[0] == '['`
fn find_predicate_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices().skip(1) {
        match ch {
            '\'' | '"' => {
                if quote == Some(ch) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(ch);
                }
            }
            ']' if quote.is_none() => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_predicate(inner: &str) -> Option<Predicate> {
    if let Ok(n) = inner.parse::<usize>() {
        return if n >= 1 {
            Some(Predicate::Position(n))
        } else {
            None
        };
    }

    let attr = inner.strip_prefix('@')?;
    if let Some((name, value)) = attr.split_once('=') {
        let raw = value.trim();
        let unquoted = raw
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .or_else(|| raw.strip_prefix('"').and_then(|v| v.strip_suffix('"')))?;
        Some(Predicate::AttrEquals(
            name.trim().to_ascii_lowercase(),
            unquoted.to_string(),
        ))
    } else {
        let name = attr.trim();
        if name.is_empty() {
            return None;
        }
        Some(Predicate::HasAttr(name.to_ascii_lowercase()))
    }
}
