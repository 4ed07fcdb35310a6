//! Key template rendering.
//!
//! Record keys are rendered from a per-table template over the record's own
//! field values, e.g. `"{{table}}:{{id | zero_pad(8)}}"`. The syntax is a
//! deliberately small subset of the usual double-brace template languages:
//! `{{ binding }}` substitutes a context value, and an optional
//! `| filter` or `| filter(arg)` pipes it through a registered filter.
//!
//! Rendering is best-effort: unresolved bindings, bad syntax, and filter
//! failures are collected as errors for the caller to log, while the output
//! still carries everything that did resolve. A render error never aborts a
//! batch.
//!
//! Filters live behind the [`TemplateFilter`] trait so callers can register
//! their own; `zero_pad` ships by default.

use std::collections::HashMap;

/// Default pad width for `zero_pad` when no argument is given.
const DEFAULT_ZERO_PAD_WIDTH: usize = 10;

/// Error type for template rendering. Always per-record and non-fatal.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("unresolved binding '{0}'")]
    UnresolvedBinding(String),

    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("unterminated '{{{{' expression")]
    UnterminatedExpression,

    #[error("empty template expression")]
    EmptyExpression,

    #[error("filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
}

/// String bindings available to one render call.
#[derive(Debug, Default)]
pub struct TemplateContext {
    bindings: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// Outcome of a render: best-effort output plus any errors hit on the way.
#[derive(Debug)]
pub struct RenderResult {
    pub output: String,
    pub errors: Vec<TemplateError>,
}

/// A named value filter usable in template expressions.
pub trait TemplateFilter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Apply the filter to a resolved binding value. Errors are collected
    /// by the renderer; the unfiltered value is used in the output.
    fn apply(&self, value: &str, arg: Option<&str>) -> Result<String, TemplateError>;
}

/// Left-pads a numeric value with zeros to a fixed width (default 10).
/// Values already at or over the width pass through unchanged.
pub struct ZeroPadFilter;

impl TemplateFilter for ZeroPadFilter {
    fn name(&self) -> &'static str {
        "zero_pad"
    }

    fn apply(&self, value: &str, arg: Option<&str>) -> Result<String, TemplateError> {
        let width = match arg {
            None => DEFAULT_ZERO_PAD_WIDTH,
            Some(raw) => raw.trim().parse().map_err(|_| TemplateError::Filter {
                filter: "zero_pad".into(),
                reason: format!("width '{raw}' is not a number"),
            })?,
        };

        if value.len() >= width {
            return Ok(value.to_string());
        }

        let number: u64 = value.parse().map_err(|_| TemplateError::Filter {
            filter: "zero_pad".into(),
            reason: format!("value '{value}' is not numeric"),
        })?;
        Ok(format!("{number:0width$}"))
    }
}

/// Template renderer with a pluggable filter registry.
pub struct TemplateEngine {
    filters: HashMap<&'static str, Box<dyn TemplateFilter>>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Engine with the default filter set (`zero_pad`).
    pub fn new() -> Self {
        let mut engine = Self {
            filters: HashMap::new(),
        };
        engine.register(Box::new(ZeroPadFilter));
        engine
    }

    /// Register a filter, replacing any existing filter of the same name.
    pub fn register(&mut self, filter: Box<dyn TemplateFilter>) {
        self.filters.insert(filter.name(), filter);
    }

    /// Render `template` against `context`, best-effort.
    pub fn render(&self, template: &str, context: &TemplateContext) -> RenderResult {
        let mut output = String::with_capacity(template.len());
        let mut errors = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            output.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                None => {
                    // No closing braces; keep the tail literally.
                    errors.push(TemplateError::UnterminatedExpression);
                    output.push_str(&rest[open..]);
                    rest = "";
                    break;
                }
                Some(close) => {
                    let (value, mut expr_errors) = self.eval(&after[..close], context);
                    output.push_str(&value);
                    errors.append(&mut expr_errors);
                    rest = &after[close + 2..];
                }
            }
        }
        output.push_str(rest);

        RenderResult { output, errors }
    }

    /// Evaluate one `binding | filter(arg)` expression. Returns the
    /// best-effort value plus any errors.
    fn eval(&self, expr: &str, context: &TemplateContext) -> (String, Vec<TemplateError>) {
        let mut errors = Vec::new();
        let mut parts = expr.splitn(2, '|');
        let binding = parts.next().unwrap_or("").trim();

        if binding.is_empty() {
            return (String::new(), vec![TemplateError::EmptyExpression]);
        }

        let value = match context.get(binding) {
            Some(value) => value.to_string(),
            None => {
                errors.push(TemplateError::UnresolvedBinding(binding.to_string()));
                return (String::new(), errors);
            }
        };

        let Some(filter_expr) = parts.next() else {
            return (value, errors);
        };

        let (filter_name, arg) = parse_filter_expr(filter_expr);
        match self.filters.get(filter_name) {
            None => {
                errors.push(TemplateError::UnknownFilter(filter_name.to_string()));
                (value, errors)
            }
            Some(filter) => match filter.apply(&value, arg) {
                Ok(filtered) => (filtered, errors),
                Err(error) => {
                    errors.push(error);
                    (value, errors)
                }
            },
        }
    }
}

/// Split `zero_pad(5)` into `("zero_pad", Some("5"))`; a bare `zero_pad`
/// yields no argument.
fn parse_filter_expr(expr: &str) -> (&str, Option<&str>) {
    let expr = expr.trim();
    match expr.find('(') {
        Some(open) if expr.ends_with(')') => {
            let name = expr[..open].trim();
            let arg = expr[open + 1..expr.len() - 1].trim();
            (name, if arg.is_empty() { None } else { Some(arg) })
        }
        _ => (expr, None),
    }
}
