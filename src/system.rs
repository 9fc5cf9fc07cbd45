use crate::{
    config::ShellConfig,
    effects::{JsClock, JsRandom},
    escalation::RestoreTicket,
    logger,
    terminal::{Key, Terminal},
};
use log::info;
use wasm_bindgen::prelude::*;

/// A terminal wired to the browser's random source and clock.
pub fn browser_terminal(config: ShellConfig) -> Terminal {
    if let Ok(level) = config.level_filter() {
        logger::init(level);
    }
    info!("frqise_shell starting for {}@{}", config.user, config.host);
    Terminal::new(config, Box::new(JsRandom), Box::new(JsClock::new()))
}

/// JS-facing handle for pages that do their own DOM work.
#[wasm_bindgen]
pub struct WebShell {
    term: Terminal,
    restore: Option<RestoreTicket>,
}

impl Default for WebShell {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebShell {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebShell {
        WebShell {
            term: browser_terminal(ShellConfig::default()),
            restore: None,
        }
    }

    #[wasm_bindgen]
    pub fn with_config(json: &str) -> Result<WebShell, JsValue> {
        let config =
            ShellConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebShell {
            term: browser_terminal(config),
            restore: None,
        })
    }

    /// Feeds a `KeyboardEvent.key`. Returns true when the page should call
    /// `preventDefault()`.
    #[wasm_bindgen]
    pub fn key(&mut self, key: &str) -> bool {
        let outcome = self.term.key(Key::from_name(key));
        if outcome.restore.is_some() {
            self.restore = outcome.restore;
        }
        outcome.prevent_default
    }

    #[wasm_bindgen]
    pub fn set_input(&mut self, text: &str) {
        self.term.set_input(text);
    }

    #[wasm_bindgen]
    pub fn input(&self) -> String {
        self.term.input().to_string()
    }

    #[wasm_bindgen]
    pub fn suggestion(&self) -> String {
        self.term.suggestion().unwrap_or_default().to_string()
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> String {
        self.term.prompt()
    }

    #[wasm_bindgen]
    pub fn location(&self) -> String {
        self.term.location()
    }

    #[wasm_bindgen]
    pub fn transcript_html(&self) -> String {
        self.term.transcript().to_html()
    }

    #[wasm_bindgen]
    pub fn transcript_text(&self) -> String {
        self.term.transcript().to_text()
    }

    #[wasm_bindgen]
    pub fn is_locked(&self) -> bool {
        self.term.is_locked()
    }

    /// Id of a restore the page must schedule, taken once.
    #[wasm_bindgen]
    pub fn take_restore_id(&mut self) -> Option<u32> {
        self.restore.take().map(|t| t.id)
    }

    #[wasm_bindgen]
    pub fn restore_delay_ms(&self) -> u32 {
        self.term.config().restore_delay_ms
    }

    #[wasm_bindgen]
    pub fn restore(&mut self, id: u32) -> bool {
        self.term.restore(id)
    }

    #[wasm_bindgen]
    pub fn cancel_restore(&mut self) -> Option<u32> {
        self.restore = None;
        self.term.cancel_restore()
    }

    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.term.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
