//! Clipboard plumbing: async clipboard API with a manual-selection fallback.

use gloo::console;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlDocument, HtmlTextAreaElement};

/// Copy `text`, preferring the async clipboard API. Both paths surface a
/// user-visible notification; a failed fallback is only logged.
pub fn copy_text(text: String) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let navigator = window.navigator();

    // Older engines expose no clipboard object at all.
    let has_clipboard = js_sys::Reflect::has(navigator.as_ref(), &"clipboard".into())
        .unwrap_or(false);
    if !has_clipboard {
        fallback_copy(&text);
        return;
    }

    spawn_local(async move {
        let promise = window.navigator().clipboard().write_text(&text);
        match JsFuture::from(promise).await {
            Ok(_) => super::controls::notify("Copied to clipboard"),
            Err(err) => {
                console::warn!("clipboard write rejected", err);
                fallback_copy(&text);
            }
        }
    });
}

/// Textarea + `execCommand("copy")` path for engines without the async API
/// or with a rejected permission prompt.
fn fallback_copy(text: &str) {
    let result = (|| -> Option<bool> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;

        let textarea: HtmlTextAreaElement =
            document.create_element("textarea").ok()?.dyn_into().ok()?;
        textarea.set_value(text);
        textarea
            .style()
            .set_css_text("position: fixed; left: -9999px; top: -9999px;");
        body.append_child(&textarea).ok()?;
        textarea.focus().ok();
        textarea.select();

        let copied = document
            .dyn_ref::<HtmlDocument>()
            .and_then(|d| d.exec_command("copy").ok())
            .unwrap_or(false);

        textarea.remove();
        Some(copied)
    })();

    match result {
        Some(true) => super::controls::notify("Copied to clipboard"),
        _ => {
            console::error!("manual copy fallback failed");
            super::controls::notify("Copy failed, select and copy manually");
        }
    }
}
