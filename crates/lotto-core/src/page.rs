// Page context: the element handles the widget reads and writes.
//
// Every element is addressed by a fixed identifier and may be absent. The
// draw controller and form submitter receive `&mut Page` and skip whatever
// is missing instead of failing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::config::Config;
use crate::draw::Ball;

// ---------------------------------------------------------------------------
// ElementId
// ---------------------------------------------------------------------------

/// Fixed identifiers of the page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Numbers,
    GenerateButton,
    RoundNote,
    PartnerForm,
    FormStatus,
    SubmitButton,
    UpdatedAt,
}

impl ElementId {
    pub const ALL: [ElementId; 7] = [
        ElementId::Numbers,
        ElementId::GenerateButton,
        ElementId::RoundNote,
        ElementId::PartnerForm,
        ElementId::FormStatus,
        ElementId::SubmitButton,
        ElementId::UpdatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::Numbers => "numbers",
            ElementId::GenerateButton => "generateBtn",
            ElementId::RoundNote => "roundNote",
            ElementId::PartnerForm => "partnerForm",
            ElementId::FormStatus => "formStatus",
            ElementId::SubmitButton => "submitBtn",
            ElementId::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown element id `{s}`"))
    }
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Container for the rendered balls of the current round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumbersDisplay {
    round: u64,
    balls: Vec<Ball>,
}

impl NumbersDisplay {
    /// Replace the displayed balls in full. Nothing from the previous round
    /// survives.
    pub fn show(&mut self, round: u64, balls: Vec<Ball>) {
        self.round = round;
        self.balls = balls;
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }
}

/// A plain text element (round note, form status, updated-at).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextElement {
    text: String,
}

impl TextElement {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    enabled: bool,
}

impl Default for Button {
    fn default() -> Self {
        Button { enabled: true }
    }
}

impl Button {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// The partner (contact) form: an endpoint plus ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerForm {
    action: String,
    fields: Vec<FormField>,
}

impl PartnerForm {
    pub fn new<I, S>(action: impl Into<String>, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PartnerForm {
            action: action.into(),
            fields: field_names
                .into_iter()
                .map(|name| FormField {
                    name: name.into(),
                    value: String::new(),
                })
                .collect(),
        }
    }

    /// The configured endpoint, verbatim.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    /// Set a field by name. Returns false when no such field exists.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Field values as ordered name/value pairs, ready for encoding.
    pub fn serialize(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Clear every field value.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// All element handles of the page. `None` means the element is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub numbers: Option<NumbersDisplay>,
    pub generate_button: Option<Button>,
    pub round_note: Option<TextElement>,
    pub partner_form: Option<PartnerForm>,
    pub form_status: Option<TextElement>,
    pub submit_button: Option<Button>,
    pub updated_at: Option<TextElement>,
}

impl Page {
    /// A page with every element present.
    pub fn full(form: PartnerForm) -> Self {
        Page {
            numbers: Some(NumbersDisplay::default()),
            generate_button: Some(Button::default()),
            round_note: Some(TextElement::default()),
            partner_form: Some(form),
            form_status: Some(TextElement::default()),
            submit_button: Some(Button::default()),
            updated_at: Some(TextElement::default()),
        }
    }

    /// Build the page described by the config, leaving out omitted elements.
    pub fn build(config: &Config) -> Self {
        let form = PartnerForm::new(config.form.action.clone(), config.form.fields.clone());
        let mut page = Page::full(form);
        for id in config.page.omitted() {
            page.remove(id);
        }
        page
    }

    pub fn remove(&mut self, id: ElementId) {
        match id {
            ElementId::Numbers => self.numbers = None,
            ElementId::GenerateButton => self.generate_button = None,
            ElementId::RoundNote => self.round_note = None,
            ElementId::PartnerForm => self.partner_form = None,
            ElementId::FormStatus => self.form_status = None,
            ElementId::SubmitButton => self.submit_button = None,
            ElementId::UpdatedAt => self.updated_at = None,
        }
    }

    pub fn has(&self, id: ElementId) -> bool {
        match id {
            ElementId::Numbers => self.numbers.is_some(),
            ElementId::GenerateButton => self.generate_button.is_some(),
            ElementId::RoundNote => self.round_note.is_some(),
            ElementId::PartnerForm => self.partner_form.is_some(),
            ElementId::FormStatus => self.form_status.is_some(),
            ElementId::SubmitButton => self.submit_button.is_some(),
            ElementId::UpdatedAt => self.updated_at.is_some(),
        }
    }

    /// Set the form status text, if the page has a status element.
    pub fn set_status(&mut self, text: &str) {
        if let Some(status) = self.form_status.as_mut() {
            status.set(text);
        }
    }

    /// Write the "last updated" date, if the page has an updated-at element.
    pub fn stamp_updated_at(&mut self, date: NaiveDate) {
        if let Some(updated) = self.updated_at.as_mut() {
            updated.set(format_updated_at(date));
        }
    }
}

/// `YYYY-MM-DD`.
pub fn format_updated_at(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
