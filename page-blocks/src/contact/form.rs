//! Contact form configuration and submission validation

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{description, heading, ContactQuery, FormPreset, ServiceCategory};

const MAX_MESSAGE_CHARS: usize = 5000;
const MAX_PARTICIPANTS: u32 = 500;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("invalid email pattern")
});

/// Optional leading `+`, then at least seven digits with spaces, dashes or parentheses between
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(?:[ ()-]*[0-9]){7,}[ ()-]*$").expect("invalid phone pattern")
});

/// Input fields the contact form can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Company,
    Participants,
    PreferredDate,
    Service,
    Message,
}

impl FormField {
    /// Form control name
    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Company => "company",
            FormField::Participants => "participants",
            FormField::PreferredDate => "preferredDate",
            FormField::Service => "service",
            FormField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Namn",
            FormField::Email => "E-post",
            FormField::Phone => "Telefon",
            FormField::Company => "Företag",
            FormField::Participants => "Antal deltagare",
            FormField::PreferredDate => "Önskat datum",
            FormField::Service => "Utbildningsområde",
            FormField::Message => "Meddelande",
        }
    }

    /// HTML input type; `None` for fields that are not plain inputs
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            FormField::Email => Some("email"),
            FormField::Phone => Some("tel"),
            FormField::Participants => Some("number"),
            FormField::PreferredDate => Some("date"),
            FormField::Service | FormField::Message => None,
            FormField::Name | FormField::Company => Some("text"),
        }
    }
}

/// A field shown by a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: FormField,
    pub required: bool,
}

const fn shown(field: FormField) -> FieldConfig {
    FieldConfig {
        field,
        required: false,
    }
}

const fn required(field: FormField) -> FieldConfig {
    FieldConfig {
        field,
        required: true,
    }
}

impl FormPreset {
    /// Fields shown by this preset, in display order
    pub fn fields(self) -> Vec<FieldConfig> {
        use FormField::*;
        match self {
            FormPreset::Quote => vec![
                required(Name),
                required(Email),
                shown(Phone),
                required(Company),
                required(Participants),
                required(Service),
                shown(Message),
            ],
            FormPreset::Callback => vec![required(Name), required(Phone), shown(Message)],
            FormPreset::Booking => vec![
                required(Name),
                required(Email),
                required(Phone),
                required(Company),
                required(Participants),
                shown(PreferredDate),
                required(Service),
                shown(Message),
            ],
            FormPreset::General => vec![
                required(Name),
                required(Email),
                shown(Phone),
                shown(Company),
                shown(Service),
                required(Message),
            ],
        }
    }
}

/// Everything the contact page needs to render its form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFormConfig {
    pub preset: FormPreset,
    pub heading: String,
    pub description: String,
    pub service: Option<ServiceCategory>,
    pub prefilled_message: Option<String>,
    pub fields: Vec<FieldConfig>,
}

impl ContactFormConfig {
    /// Derive the form from the contact page query
    pub fn from_query(query: &ContactQuery) -> Self {
        let preset = query.preset_override().unwrap_or_default();
        Self {
            preset,
            heading: heading(query),
            description: description(query),
            service: query.service_category(),
            prefilled_message: query
                .product
                .as_deref()
                .map(|product| format!("Jag är intresserad av {}.", product)),
            fields: preset.fields(),
        }
    }

    /// Form for a preset with its own default copy
    pub fn for_preset(preset: FormPreset) -> Self {
        Self {
            preset,
            heading: preset.heading().to_string(),
            description: preset.description().to_string(),
            service: None,
            prefilled_message: None,
            fields: preset.fields(),
        }
    }

    pub fn field(&self, field: FormField) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.field == field)
    }
}

/// A posted contact form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub participants: String,
    pub preferred_date: String,
    pub service: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Company => &self.company,
            FormField::Participants => &self.participants,
            FormField::PreferredDate => &self.preferred_date,
            FormField::Service => &self.service,
            FormField::Message => &self.message,
        }
    }

    /// Check the submission against the fields the form showed.
    ///
    /// Fields the preset does not show are ignored. All problems are
    /// collected, not only the first.
    pub fn validate(&self, config: &ContactFormConfig) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for fc in &config.fields {
            let value = self.value(fc.field).trim();
            if value.is_empty() {
                if fc.required {
                    errors.push(FieldError::new(fc.field, "Fältet är obligatoriskt"));
                }
                continue;
            }
            if let Some(message) = check_format(fc.field, value) {
                errors.push(FieldError::new(fc.field, message));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

fn check_format(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Email if !is_valid_email(value) => Some("Ange en giltig e-postadress"),
        FormField::Phone if !is_valid_phone(value) => Some("Ange ett giltigt telefonnummer"),
        FormField::Participants => match value.parse::<u32>() {
            Ok(n) if (1..=MAX_PARTICIPANTS).contains(&n) => None,
            _ => Some("Ange ett antal mellan 1 och 500"),
        },
        FormField::PreferredDate if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() => {
            Some("Ange ett datum (ÅÅÅÅ-MM-DD)")
        }
        FormField::Service if value.parse::<ServiceCategory>().is_err() => {
            Some("Välj ett utbildningsområde i listan")
        }
        FormField::Message if value.chars().count() > MAX_MESSAGE_CHARS => {
            Some("Meddelandet är för långt")
        }
        _ => None,
    }
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Validation problem on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Field-level validation failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}
