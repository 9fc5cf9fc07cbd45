use crate::config::ShellConfig;
use crate::escalation::RestoreTicket;
use crate::system::browser_terminal;
use crate::terminal::{Key, Terminal};
use log::debug;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Event, HtmlInputElement, KeyboardEvent};

struct Page {
    input: HtmlInputElement,
    hint: Element,
    output: Element,
    prompt: Element,
    location: Element,
}

thread_local! {
    static TERM: RefCell<Option<Terminal>> = const { RefCell::new(None) };
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static TIMEOUT_HANDLE: Cell<i32> = const { Cell::new(-1) };
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn by_id(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

fn render(sync_input: bool) {
    TERM.with(|t| {
        PAGE.with(|p| {
            let term = t.borrow();
            let page = p.borrow();
            let (Some(term), Some(page)) = (term.as_ref(), page.as_ref()) else {
                return;
            };
            if sync_input {
                page.input.set_value(term.input());
            }
            page.hint
                .set_text_content(Some(term.suggestion().unwrap_or_default()));
            page.output.set_inner_html(&term.transcript().to_html());
            page.output.set_scroll_top(page.output.scroll_height());
            page.prompt.set_text_content(Some(&term.prompt()));
            page.location.set_text_content(Some(&term.location()));

            let locked = term.is_locked();
            page.input.set_disabled(locked);
            if let Some(body) = document().ok().and_then(|d| d.body()) {
                let classes = body.class_list();
                let _ = if locked {
                    classes.add_1("glitch-mode")
                } else {
                    classes.remove_1("glitch-mode")
                };
            }
            if !locked && sync_input {
                let _ = page.input.focus();
            }
        })
    });
}

fn with_term<R>(f: impl FnOnce(&mut Terminal) -> R) -> Option<R> {
    TERM.with(|t| t.borrow_mut().as_mut().map(f))
}

fn schedule_restore(ticket: RestoreTicket) -> Result<(), JsValue> {
    clear_timeout();
    let id = ticket.id;
    let callback = Closure::once_into_js(move || {
        TIMEOUT_HANDLE.with(|h| h.set(-1));
        if with_term(|t| t.restore(id)).unwrap_or(false) {
            render(true);
        }
    });
    let handle = window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            ticket.delay_ms as i32,
        )?;
    TIMEOUT_HANDLE.with(|h| h.set(handle));
    debug!("restore #{} scheduled as timeout {}", id, handle);
    Ok(())
}

fn clear_timeout() {
    TIMEOUT_HANDLE.with(|h| {
        let id = h.replace(-1);
        if id != -1 {
            if let Some(w) = window() {
                w.clear_timeout_with_handle(id);
            }
        }
    });
}

fn attach_listeners(input: &HtmlInputElement) -> Result<(), JsValue> {
    let on_input = Closure::<dyn FnMut(_)>::wrap(Box::new(|e: Event| {
        let text = e
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .map(|i| i.value())
            .unwrap_or_default();
        with_term(|t| t.set_input(&text));
        render(false);
    }));
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget(); // lives as long as the page

    let on_key = Closure::<dyn FnMut(_)>::wrap(Box::new(|e: KeyboardEvent| {
        let key = Key::from_name(&e.key());
        if key == Key::Other {
            return;
        }
        let Some(outcome) = with_term(|t| t.key(key)) else {
            return;
        };
        if outcome.prevent_default {
            e.prevent_default();
        }
        render(true);
        if let Some(ticket) = outcome.restore {
            if let Err(err) = schedule_restore(ticket) {
                web_sys::console::error_1(&err);
            }
        }
    }));
    input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}

/// Binds a session to existing page elements. `config` is optional JSON.
#[wasm_bindgen]
pub fn mount(
    input_id: &str,
    hint_id: &str,
    output_id: &str,
    prompt_id: &str,
    location_id: &str,
    config: Option<String>,
) -> Result<(), JsValue> {
    let config = match config {
        Some(json) => {
            ShellConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => ShellConfig::default(),
    };
    let doc = document()?;
    let input: HtmlInputElement = by_id(&doc, input_id)?.dyn_into()?;
    let page = Page {
        hint: by_id(&doc, hint_id)?,
        output: by_id(&doc, output_id)?,
        prompt: by_id(&doc, prompt_id)?,
        location: by_id(&doc, location_id)?,
        input: input.clone(),
    };

    let first_mount = PAGE.with(|p| p.borrow().is_none());
    clear_timeout();
    TERM.with(|t| *t.borrow_mut() = Some(browser_terminal(config)));
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    if first_mount {
        attach_listeners(&input)?;
    }
    render(true);
    Ok(())
}

/// Drops a pending session restore. The input stays disabled.
#[wasm_bindgen]
pub fn cancel_restore() -> Option<u32> {
    clear_timeout();
    with_term(|t| t.cancel_restore()).flatten()
}
