use crate::config::Config;
use crate::errors::EvalError;
use crate::evaluate::evaluate_with;

/// Button labels and their (row, column) in a 4x5 grid.
pub const BUTTON_LAYOUT: [(&str, (usize, usize)); 20] = [
    ("7", (0, 0)),
    ("8", (0, 1)),
    ("9", (0, 2)),
    ("/", (0, 3)),
    ("C", (0, 4)),
    ("4", (1, 0)),
    ("5", (1, 1)),
    ("6", (1, 2)),
    ("*", (1, 3)),
    ("(", (1, 4)),
    ("1", (2, 0)),
    ("2", (2, 1)),
    ("3", (2, 2)),
    ("-", (2, 3)),
    (")", (2, 4)),
    ("0", (3, 0)),
    ("00", (3, 1)),
    (".", (3, 2)),
    ("+", (3, 3)),
    ("=", (3, 4)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Appended to the display as-is: a digit, `00`, `.`, an operator or a
    /// parenthesis.
    Input(&'static str),
    /// `=` or Enter.
    Evaluate,
    /// `C`
    Clear,
}

impl Key {
    /// The key for a button label. `Enter` is accepted as well as `=`.
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "=" | "Enter" => Some(Key::Evaluate),
            "C" => Some(Key::Clear),
            _ => BUTTON_LAYOUT
                .iter()
                .find(|(text, _)| *text == label)
                .map(|(text, _)| Key::Input(*text)),
        }
    }
}

/// The display buffer and what the buttons do to it.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    display: String,
    last_error: Option<EvalError>,
    config: Config,
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator::default()
    }

    pub fn with_config(config: Config) -> Calculator {
        Calculator {
            config,
            ..Calculator::default()
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Why the display shows the error text, if it does.
    pub fn last_error(&self) -> Option<&EvalError> {
        self.last_error.as_ref()
    }

    pub fn shows_error(&self) -> bool {
        self.display == self.config.error_text
    }

    pub fn press(&mut self, key: Key) {
        tracing::trace!(?key, display = %self.display, "key pressed");
        match key {
            Key::Input(text) => self.build_expression(text),
            Key::Evaluate => self.calculate_result(),
            Key::Clear => self.clear(),
        }
    }

    /// Returns false, and does nothing, for a label that is not a button.
    pub fn press_label(&mut self, label: &str) -> bool {
        match Key::from_label(label) {
            Some(key) => {
                self.press(key);
                true
            }
            None => {
                tracing::debug!(label, "unknown button label");
                false
            }
        }
    }

    /// Replace the display with typed text, which may hold anything.
    pub fn set_display(&mut self, text: &str) {
        self.display.clear();
        self.display.push_str(text);
        self.last_error = None;
    }

    pub fn clear(&mut self) {
        self.set_display("");
    }

    fn build_expression(&mut self, text: &str) {
        if self.shows_error() {
            self.clear();
        }
        self.display.push_str(text);
    }

    fn calculate_result(&mut self) {
        match evaluate_with(&self.display, &self.config.eval) {
            Ok(value) => {
                // Positional, so the result can be typed onward.
                let digits = self.config.eval.significant_digits;
                self.display = format!("{:#.*}", digits, value);
                self.last_error = None;
            }
            Err(e) => {
                self.display = self.config.error_text.clone();
                self.last_error = Some(e);
            }
        }
    }
}
