//! QR code detection. Proof that the flow reached a payable state is an
//! element matching one of the known QR container patterns, searched in
//! embedded frames (one nesting level) before the top-level document.

use crate::browser::dom;
use crate::probes::ProbeSignal;
use chromiumoxide::Page;
use serde_json::Value;

/// Ordered most-specific first; the first non-zero count wins. The last
/// three cover processors that embed their code as an image or a pay frame
/// instead of a generated container.
pub const QR_SELECTORS: &[&str] = &[
    "div#qrcode-container",
    "div#dowloadQr",
    "div[id*='qr' i]",
    "div.qr-image.position-relative",
    "div.qr-image",
    "div.payFrame",
];

pub async fn probe(page: &Page) -> ProbeSignal {
    let selectors = serde_json::to_string(QR_SELECTORS).unwrap_or_else(|_| "[]".to_string());

    let js = format!(
        r#"(() => {{
            const selectors = {selectors};
            const scan = (doc) => {{
                for (const sel of selectors) {{
                    try {{
                        const n = doc.querySelectorAll(sel).length;
                        if (n > 0) return {{ count: n, selector: sel }};
                    }} catch (e) {{}}
                }}
                return null;
            }};

            const frames = Array.from(document.querySelectorAll('iframe'));
            for (const frame of frames) {{
                try {{
                    const doc = frame.contentDocument;
                    if (!doc) continue;
                    const hit = scan(doc);
                    if (hit) return {{ ...hit, scope: 'frame', frames: frames.length }};
                    for (const inner of Array.from(doc.querySelectorAll('iframe'))) {{
                        try {{
                            const innerDoc = inner.contentDocument;
                            if (!innerDoc) continue;
                            const nested = scan(innerDoc);
                            if (nested) return {{ ...nested, scope: 'nested-frame', frames: frames.length }};
                        }} catch (e) {{}}
                    }}
                }} catch (e) {{}}
            }}

            const hit = scan(document);
            if (hit) return {{ ...hit, scope: 'page', frames: frames.length }};
            return {{ count: 0, frames: frames.length }};
        }})()"#,
        selectors = selectors,
    );

    match dom::eval_json(page, &js).await {
        Ok(value) => {
            let frames = value.get("frames").and_then(Value::as_u64).unwrap_or(0);
            let count = value.get("count").and_then(Value::as_u64).unwrap_or(0);
            if count > 0 {
                let scope = value.get("scope").and_then(Value::as_str).unwrap_or("?");
                let selector = value.get("selector").and_then(Value::as_str).unwrap_or("?");
                tracing::info!(
                    "QR detected: count={} scope={} selector={} (iframes: {})",
                    count,
                    scope,
                    selector,
                    frames
                );
            } else {
                tracing::info!("No QR detected (iframes: {})", frames);
            }
            ProbeSignal::from_count(count)
        }
        Err(e) => {
            tracing::warn!("⚠️ QR probe error: {}", e);
            ProbeSignal::Error(e.to_string())
        }
    }
}
