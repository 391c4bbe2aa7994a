//! Page interaction helpers shared by the site adapters and probes.
//!
//! All lookups run inside the page via `evaluate`, so they see exactly what
//! the site's own scripts see. `Ok(false)` from the click/fill helpers means
//! "control not found"; callers tag that with their own step name.

use crate::error::BotError;
use chromiumoxide::Page;
use serde_json::Value;

/// Embed a Rust string as a JS string literal.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

pub async fn eval_json(page: &Page, js: &str) -> Result<Value, BotError> {
    let result = page.evaluate(js).await?;
    result
        .into_value::<Value>()
        .map_err(|e| BotError::Parse(e.to_string()))
}

pub async fn current_url(page: &Page) -> Result<String, BotError> {
    page.url()
        .await?
        .ok_or_else(|| BotError::Navigation("page has no URL".to_string()))
}

/// Click the nth button whose accessible name (aria-label or trimmed text)
/// equals `name`. Buttons include `[role="button"]` elements.
pub async fn click_button_named_nth(
    page: &Page,
    name: &str,
    nth: usize,
) -> Result<bool, BotError> {
    let js = format!(
        r#"(() => {{
            const wanted = {name}.trim();
            const buttons = Array.from(document.querySelectorAll('button, [role="button"]'))
                .filter(b => {{
                    const label = (b.getAttribute('aria-label') || '').trim();
                    const text = (b.innerText || '').trim();
                    return label === wanted || text === wanted;
                }});
            const btn = buttons[{nth}];
            if (!btn) return {{ clicked: false, matches: buttons.length }};
            btn.scrollIntoView({{ block: 'center' }});
            btn.click();
            return {{ clicked: true, matches: buttons.length }};
        }})()"#,
        name = js_str(name),
        nth = nth,
    );

    let value = eval_json(page, &js).await?;
    Ok(value
        .get("clicked")
        .and_then(Value::as_bool)
        .unwrap_or(false))
}

pub async fn click_button_named(page: &Page, name: &str) -> Result<bool, BotError> {
    click_button_named_nth(page, name, 0).await
}

/// Click every button under `container_css` matching `button_css` whose text
/// contains `text`. Returns the number clicked. Some topbars render the same
/// login control twice (desktop and mobile) and only one is interactable.
pub async fn click_all_in(
    page: &Page,
    container_css: &str,
    button_css: &str,
    text: &str,
) -> Result<u64, BotError> {
    let js = format!(
        r#"(() => {{
            const container = document.querySelector({container});
            if (!container) return {{ clicked: 0 }};
            const wanted = {text};
            let clicked = 0;
            for (const btn of container.querySelectorAll({button})) {{
                if ((btn.innerText || '').includes(wanted)) {{
                    btn.scrollIntoView({{ block: 'center' }});
                    btn.click();
                    clicked += 1;
                }}
            }}
            return {{ clicked }};
        }})()"#,
        container = js_str(container_css),
        button = js_str(button_css),
        text = js_str(text),
    );

    let value = eval_json(page, &js).await?;
    Ok(value.get("clicked").and_then(Value::as_u64).unwrap_or(0))
}

pub async fn click_selector(page: &Page, css: &str) -> Result<bool, BotError> {
    let js = format!(
        r#"(() => {{
            const el = document.querySelector({css});
            if (!el) return {{ clicked: false }};
            el.scrollIntoView({{ block: 'center' }});
            el.click();
            return {{ clicked: true }};
        }})()"#,
        css = js_str(css),
    );

    let value = eval_json(page, &js).await?;
    Ok(value
        .get("clicked")
        .and_then(Value::as_bool)
        .unwrap_or(false))
}

/// Click the nth element matching `css`, counted in DOM order.
pub async fn click_selector_nth(page: &Page, css: &str, nth: usize) -> Result<bool, BotError> {
    let js = format!(
        r#"(() => {{
            const el = document.querySelectorAll({css})[{nth}];
            if (!el) return {{ clicked: false }};
            el.scrollIntoView({{ block: 'center' }});
            el.click();
            return {{ clicked: true }};
        }})()"#,
        css = js_str(css),
        nth = nth,
    );

    let value = eval_json(page, &js).await?;
    Ok(value
        .get("clicked")
        .and_then(Value::as_bool)
        .unwrap_or(false))
}

/// Fill an input found by CSS selector, firing the framework events the
/// sites listen for.
pub async fn fill_selector(page: &Page, css: &str, text: &str) -> Result<bool, BotError> {
    let js = format!(
        r#"(() => {{
            const el = document.querySelector({css});
            if (!el) return {{ filled: false }};
            el.focus();
            el.value = {text};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            el.dispatchEvent(new Event('blur', {{ bubbles: true }}));
            return {{ filled: true }};
        }})()"#,
        css = js_str(css),
        text = js_str(text),
    );

    let value = eval_json(page, &js).await?;
    Ok(value.get("filled").and_then(Value::as_bool).unwrap_or(false))
}

pub async fn fill_placeholder(page: &Page, placeholder: &str, text: &str) -> Result<bool, BotError> {
    let css = format!("input[placeholder={}]", js_str(placeholder));
    let js = format!(
        r#"(() => {{
            const el = document.querySelector({css});
            if (!el) return {{ filled: false }};
            el.focus();
            el.value = {text};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ filled: true }};
        }})()"#,
        css = js_str(&css),
        text = js_str(text),
    );

    let value = eval_json(page, &js).await?;
    Ok(value.get("filled").and_then(Value::as_bool).unwrap_or(false))
}

/// Fill a textbox located by its accessible name (aria-label or placeholder).
pub async fn fill_textbox_named(page: &Page, name: &str, text: &str) -> Result<bool, BotError> {
    let js = format!(
        r#"(() => {{
            const wanted = {name}.trim();
            const inputs = Array.from(document.querySelectorAll('input, textarea'));
            const el = inputs.find(i => {{
                const label = (i.getAttribute('aria-label') || '').trim();
                const ph = (i.getAttribute('placeholder') || '').trim();
                return label === wanted || ph === wanted;
            }});
            if (!el) return {{ filled: false }};
            el.focus();
            el.value = {text};
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return {{ filled: true }};
        }})()"#,
        name = js_str(name),
        text = js_str(text),
    );

    let value = eval_json(page, &js).await?;
    Ok(value.get("filled").and_then(Value::as_bool).unwrap_or(false))
}

pub async fn inner_text(page: &Page, css: &str) -> Result<Option<String>, BotError> {
    let js = format!(
        r#"(() => {{
            const el = document.querySelector({css});
            return el ? (el.innerText || '') : null;
        }})()"#,
        css = js_str(css),
    );

    let value = eval_json(page, &js).await?;
    Ok(value.as_str().map(|s| s.to_string()))
}

pub async fn inner_texts(page: &Page, css: &str) -> Result<Vec<String>, BotError> {
    let js = format!(
        r#"(() => Array.from(document.querySelectorAll({css})).map(el => el.innerText || ''))()"#,
        css = js_str(css),
    );

    let value = eval_json(page, &js).await?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default())
}

/// Collect `attr` from every element matching `css`, in DOM order. Elements
/// without the attribute contribute an empty string.
pub async fn attrs_of(page: &Page, css: &str, attr: &str) -> Result<Vec<String>, BotError> {
    let js = format!(
        r#"(() => Array.from(document.querySelectorAll({css}))
                .map(el => el.getAttribute({attr}) || ''))()"#,
        css = js_str(css),
        attr = js_str(attr),
    );

    let value = eval_json(page, &js).await?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default())
}
