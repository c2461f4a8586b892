//! Test helpers shared by the component tests

use chrono::NaiveDate;
use leptos::*;
use regex::Regex;
use std::sync::Arc;

use appointments::{AppContext, Config, StubTransport};

/// Render a view to HTML with hydration ids and marker comments removed
pub fn render<F, N>(f: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let html = leptos::ssr::render_to_string(f).to_string();

    let hydration_ids = Regex::new(r#" data-hk="[^"]*""#).unwrap();
    let comments = Regex::new(r"(?s)<!--.*?-->").unwrap();

    let html = hydration_ids.replace_all(&html, "");
    comments.replace_all(&html, "").into_owned()
}

/// Context for Monday 2026-10-19 with the default salon
pub fn context(transport: Arc<StubTransport>) -> AppContext {
    AppContext::new(&Config::default(), transport)
        .unwrap()
        .with_today(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
}
