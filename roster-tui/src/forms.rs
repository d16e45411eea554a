//! Text forms for creating and editing records.

use roster_core::{Record, RecordFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[FormField::Name, FormField::Email, FormField::Phone]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Name,
        }
    }

    pub fn previous(&self) -> FormField {
        match self {
            FormField::Name => FormField::Phone,
            FormField::Email => FormField::Name,
            FormField::Phone => FormField::Email,
        }
    }
}

/// Submission lifecycle: `Idle -> Submitting -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub focus: FormField,
    pub phase: FormPhase,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            focus: FormField::Name,
            phase: FormPhase::Idle,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn from_record(record: &Record) -> Self {
        let fields = record.fields();
        Self {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            ..Self::new()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Trimmed request body.
    pub fn fields(&self) -> RecordFields {
        RecordFields::from_input(&self.name, &self.email, &self.phone)
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if !c.is_control() {
            self.focused_mut().push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }
}
