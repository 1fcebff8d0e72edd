//! Text input forms for sign in and sign up.

use crossterm::event::KeyCode;
use menu_core::{Credentials, Registration};

/// One editable line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Render as `*`.
    pub masked: bool,
}

impl TextField {
    fn new(label: &'static str, masked: bool) -> Self {
        Self {
            label,
            value: String::new(),
            masked,
        }
    }

    /// Text to draw.
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// What a key did to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Edited,
    Submit,
    Cancel,
}

/// Ordered fields with one focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
}

impl Form {
    fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.to_string();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    /// Apply a key press.
    ///
    /// Enter on the last field submits; on any other field it moves on.
    pub fn on_key(&mut self, code: KeyCode) -> FormInput {
        let last = self.fields.len().saturating_sub(1);
        match code {
            KeyCode::Esc => return FormInput::Cancel,
            KeyCode::Enter if self.focus >= last => return FormInput::Submit,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1).min(last);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.saturating_sub(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
            }
            _ => {}
        }
        FormInput::Edited
    }
}

pub fn login_form() -> Form {
    Form::new(vec![
        TextField::new("Email", false),
        TextField::new("Password", true),
    ])
}

pub fn register_form() -> Form {
    Form::new(vec![
        TextField::new("Email", false),
        TextField::new("Password", true),
        TextField::new("Confirm password", true),
    ])
}

pub fn credentials(form: &Form) -> Credentials {
    Credentials::new(form.value(0), form.value(1))
}

pub fn registration(form: &Form) -> Registration {
    Registration::new(form.value(0), form.value(1), form.value(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.on_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_focus() {
        let mut form = login_form();
        type_text(&mut form, "ana@menu.test");
        assert_eq!(form.on_key(KeyCode::Enter), FormInput::Edited);
        type_text(&mut form, "secrez");
        form.on_key(KeyCode::Backspace);
        type_text(&mut form, "t");

        assert_eq!(credentials(&form), Credentials::new("ana@menu.test", "secret"));
        assert_eq!(form.fields[1].display(), "******");
        assert_eq!(form.on_key(KeyCode::Enter), FormInput::Submit);
    }

    #[test]
    fn test_focus_is_clamped() {
        let mut form = register_form();
        form.on_key(KeyCode::Up);
        assert_eq!(form.focus, 0);
        for _ in 0..5 {
            form.on_key(KeyCode::Tab);
        }
        assert_eq!(form.focus, 2);
    }

    #[test]
    fn test_escape_cancels_and_clear_resets() {
        let mut form = register_form();
        type_text(&mut form, "x");
        assert_eq!(form.on_key(KeyCode::Esc), FormInput::Cancel);
        form.clear();
        assert_eq!(form.value(0), "");
    }
}
