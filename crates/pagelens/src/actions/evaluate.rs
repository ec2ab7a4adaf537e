//! Evaluate action
//!
//! The headless core has no script engine; `evaluate` compiles a small
//! property-path expression language scoped to the document. Root
//! identifiers are `document`, `element` (the resolved selector target),
//! and `args` (positional bindings); literals pass through. Hosts with a
//! real engine route `evaluate` around the core at the transport boundary.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{Action, ActionError, ActionResult, parse_input, resolve_required};
use crate::dom::{Document, NodeId, collapse_whitespace};
use crate::page::PageState;

/// Evaluates an expression against the document
pub struct EvaluateAction;

/// Input parameters for `evaluate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateInput {
    /// The expression to evaluate
    pub expression: String,

    /// Optional element bound to the `element` identifier
    pub selector: Option<String>,

    /// Positional argument bindings, addressed as `args[0]`, `args[1]`, ...
    #[serde(default)]
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Field(String),
    Index(usize),
}

impl EvaluateAction {
    /// Create the action
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for EvaluateAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for EvaluateAction {
    fn name(&self) -> &'static str {
        "evaluate"
    }

    fn description(&self) -> &'static str {
        "Evaluate a property-path expression against the document scope: \
         document.*, element.* (with a selector), args[n], and literals."
    }

    async fn execute(&self, args: &Value, page: &mut PageState) -> ActionResult {
        let input: EvaluateInput = parse_input(args)?;
        let element = match &input.selector {
            Some(selector) => Some(resolve_required(page, selector)?),
            None => None,
        };
        eval_expression(&input.expression, &page.document, element, &input.args)
            .map_err(ActionError::invalid_params)
    }
}

/// Compile and evaluate one expression
pub(crate) fn eval_expression(
    expression: &str,
    doc: &Document,
    element: Option<NodeId>,
    args: &[Value],
) -> Result<Value, String> {
    let expr = expression.trim();
    if expr.is_empty() {
        return Err("empty expression".to_string());
    }

    // Literals
    if let Some(stripped) = strip_quotes(expr) {
        return Ok(Value::String(stripped.to_string()));
    }
    match expr {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }
    if let Ok(number) = expr.parse::<f64>() {
        return serde_json::Number::from_f64(number)
            .map(Value::Number)
            .ok_or_else(|| format!("non-finite number literal: {expr}"));
    }

    // Property path
    let segments = parse_path(expr)?;
    let Some((root, rest)) = segments.split_first() else {
        return Err(format!("cannot evaluate '{expr}'"));
    };
    let Segment::Field(root_name) = root else {
        return Err(format!("expression must start with an identifier: {expr}"));
    };

    match root_name.as_str() {
        "document" => walk_value(document_object(doc), rest, expr),
        "element" => {
            let Some(node) = element else {
                return Err("expression references 'element' but no selector was given".to_string());
            };
            walk_path_on_element(doc, node, rest, expr)
        }
        "args" => walk_value(Value::Array(args.to_vec()), rest, expr),
        other => Err(format!("unknown identifier '{other}'")),
    }
}

/// Element property access shared with the `getProperty` command
pub(crate) fn element_property(doc: &Document, node: NodeId, name: &str) -> Option<Value> {
    let el = doc.element(node)?;
    let value = match name {
        "value" => Value::String(el.value.clone().unwrap_or_default()),
        "checked" => Value::Bool(el.checked),
        "selected" => Value::Bool(el.selected),
        "disabled" => Value::Bool(el.has_attr("disabled")),
        "tagName" => Value::String(el.tag.to_ascii_uppercase()),
        "id" => Value::String(el.id().unwrap_or("").to_string()),
        "className" => Value::String(el.attr("class").unwrap_or("").to_string()),
        "textContent" => Value::String(doc.text_content(node)),
        "innerText" => Value::String(collapse_whitespace(&doc.text_content(node))),
        "href" | "src" | "title" | "placeholder" | "type" | "name" | "alt" => el
            .attr(name)
            .map_or(Value::Null, |v| Value::String(v.to_string())),
        _ => return None,
    };
    Some(value)
}

fn walk_path_on_element(
    doc: &Document,
    node: NodeId,
    rest: &[Segment],
    expr: &str,
) -> Result<Value, String> {
    match rest {
        [] => Ok(json!({
            "tagName": doc.tag(node).map(str::to_ascii_uppercase),
            "connected": doc.is_connected(node),
        })),
        [Segment::Field(name), tail @ ..] => {
            let value = element_property(doc, node, name)
                .ok_or_else(|| format!("unsupported element property '{name}'"))?;
            walk_value(value, tail, expr)
        }
        _ => Err(format!("cannot index element in '{expr}'")),
    }
}

fn document_object(doc: &Document) -> Value {
    let mut map = Map::new();
    map.insert("title".to_string(), Value::String(doc.title().to_string()));
    map.insert("url".to_string(), Value::String(doc.url().to_string()));
    let (x, y) = doc.scroll_position();
    map.insert("scrollX".to_string(), json!(x));
    map.insert("scrollY".to_string(), json!(y));
    map.insert(
        "readyState".to_string(),
        Value::String("complete".to_string()),
    );
    Value::Object(map)
}

fn walk_value(mut current: Value, segments: &[Segment], expr: &str) -> Result<Value, String> {
    for segment in segments {
        current = match (segment, current) {
            (Segment::Field(name), Value::Object(mut map)) => map
                .remove(name)
                .ok_or_else(|| format!("unknown property '{name}' in '{expr}'"))?,
            (Segment::Index(i), Value::Array(mut items)) => {
                if *i >= items.len() {
                    return Err(format!("index {i} out of bounds in '{expr}'"));
                }
                items.swap_remove(*i)
            }
            (Segment::Field(name), _) => {
                return Err(format!("cannot read '{name}' in '{expr}'"));
            }
            (Segment::Index(_), _) => {
                return Err(format!("cannot index into a non-array in '{expr}'"));
            }
        };
    }
    Ok(current)
}

fn strip_quotes(expr: &str) -> Option<&str> {
    expr.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| expr.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
}

fn parse_path(expr: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut rest = expr;

    let end = ident_end(rest);
    if end == 0 {
        return Err(format!("cannot parse expression '{expr}'"));
    }
    segments.push(Segment::Field(rest[..end].to_string()));
    rest = &rest[end..];

    while !rest.is_empty() {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let end = ident_end(after_dot);
            if end == 0 {
                return Err(format!("expected property name in '{expr}'"));
            }
            segments.push(Segment::Field(after_dot[..end].to_string()));
            rest = &after_dot[end..];
        } else if let Some(after_bracket) = rest.strip_prefix('[') {
            let close = after_bracket
                .find(']')
                .ok_or_else(|| format!("unterminated index in '{expr}'"))?;
            let index: usize = after_bracket[..close]
                .trim()
                .parse()
                .map_err(|_| format!("invalid index in '{expr}'"))?;
            segments.push(Segment::Index(index));
            rest = &after_bracket[close + 1..];
        } else {
            return Err(format!("unexpected token near '{rest}' in '{expr}'"));
        }
    }
    Ok(segments)
}

fn ident_end(s: &str) -> usize {
    s.char_indices()
        .find(|&(i, c)| {
            if i == 0 {
                !(c.is_ascii_alphabetic() || c == '_' || c == '$')
            } else {
                !(c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
        })
        .map_or(s.len(), |(i, _)| i)
}
