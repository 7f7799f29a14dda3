// file: src/renderer/helpers.rs
// description: Handlebars helpers available to postmortem templates
// reference: https://docs.rs/handlebars

use crate::models::{format_minute_count, format_minutes};
use handlebars::{Handlebars, RenderErrorReason, handlebars_helper};
use serde_json::Value;

pub fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("join", Box::new(join_helper));
    registry.register_helper("minutes", Box::new(minutes_helper));
    registry.register_helper("or", Box::new(or_helper));
    registry.register_helper("any", Box::new(any_present));
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

// `{{#if (any a b c)}}`: true when at least one argument is non-empty.
handlebars_helper!(any_present: |*args| args.iter().any(|v| is_present(v)));

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `{{join list ", "}}`; the separator defaults to `, `.
fn join_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let list = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("join", 0))?;
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");

    let joined = match list.value() {
        Value::Array(items) => items
            .iter()
            .map(plain_text)
            .collect::<Vec<_>>()
            .join(separator),
        other => plain_text(other),
    };
    out.write(&joined)?;
    Ok(())
}

/// `{{minutes metrics.window_minutes}}` renders `1h 05m`.
fn minutes_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let value = h
        .param(0)
        .map(|v| v.value())
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("minutes", 0))?;
    let text = match (value.as_u64(), value.as_i64()) {
        (Some(minutes), _) => format_minute_count(minutes),
        (None, Some(minutes)) => format_minutes(minutes),
        (None, None) => {
            return Err(RenderErrorReason::InvalidParamType("integer minute count").into());
        }
    };
    out.write(&text)?;
    Ok(())
}

/// `{{or value "fallback"}}` for optional text: null or empty picks the fallback.
fn or_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let value = h
        .param(0)
        .map(|v| plain_text(v.value()))
        .unwrap_or_default();

    if value.is_empty() {
        let fallback = h.param(1).map(|v| plain_text(v.value())).unwrap_or_default();
        out.write(&fallback)?;
    } else {
        out.write(&value)?;
    }
    Ok(())
}
