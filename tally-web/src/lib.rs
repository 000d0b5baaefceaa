use tally::config::DEFAULT_ERROR_TEXT;
use tally::{evaluate, Calculator, BUTTON_LAYOUT};
use wasm_bindgen::prelude::*;

/// What the display should show after `=`: the result, or `ERROR`.
#[wasm_bindgen]
pub fn evaluate_display(input: &str) -> String {
    match evaluate(input) {
        Ok(value) => value.to_string(),
        Err(_) => DEFAULT_ERROR_TEXT.to_owned(),
    }
}

/// Button labels in grid order, for building the keypad.
#[wasm_bindgen]
pub fn button_labels() -> Vec<String> {
    BUTTON_LAYOUT
        .iter()
        .map(|(label, _)| (*label).to_owned())
        .collect()
}

#[wasm_bindgen]
#[derive(Default)]
pub struct WebCalculator {
    inner: Calculator,
}

#[wasm_bindgen]
impl WebCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebCalculator {
        WebCalculator::default()
    }

    /// Returns false for a label that is not a button.
    pub fn press(&mut self, label: &str) -> bool {
        self.inner.press_label(label)
    }

    pub fn set_display(&mut self, text: &str) {
        self.inner.set_display(text);
    }

    pub fn display(&self) -> String {
        self.inner.display().to_owned()
    }

    /// The diagnostic behind the last `ERROR`, if any.
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error().map(|e| format!("{:?}", e))
    }
}
