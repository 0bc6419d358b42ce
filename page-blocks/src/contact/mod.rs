//! Contact page behaviour
//!
//! The public contact page adapts its heading, description and form fields to
//! the query string it was opened with (`?type=quote&service=brandskydd`).
//! Derivation is pure: the same query always yields the same copy.
//!
//! Precedence for the heading is form type, then service category, then the
//! generic default. The description additionally considers a product
//! reference, ranked between form type and service.

pub mod form;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use form::{
    ContactFormConfig, ContactSubmission, FieldConfig, FieldError, FormField, ValidationErrors,
};

pub const DEFAULT_HEADING: &str = "Kontakta oss";
pub const DEFAULT_DESCRIPTION: &str =
    "Har du frågor om våra utbildningar? Fyll i formuläret så återkommer vi inom en arbetsdag.";

/// Query parameters the contact page understands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactQuery {
    /// `type` parameter: requested form preset
    #[serde(rename = "type")]
    pub form_type: Option<String>,
    /// `service` parameter: service category slug
    pub service: Option<String>,
    /// `product` parameter: free-form product or course reference
    pub product: Option<String>,
}

impl ContactQuery {
    /// Build from decoded key/value pairs. Unknown keys and blank values are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = ContactQuery::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "type" => &mut query.form_type,
                "service" => &mut query.service,
                "product" => &mut query.product,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        query
    }

    /// Parse a raw query string (with or without the leading `?`)
    pub fn parse(query_string: &str) -> Self {
        let raw = query_string.strip_prefix('?').unwrap_or(query_string);
        Self::from_pairs(url::form_urlencoded::parse(raw.as_bytes()))
    }

    /// The requested preset, if the `type` parameter names one that overrides the default copy
    pub fn preset_override(&self) -> Option<FormPreset> {
        self.form_type
            .as_deref()
            .and_then(|t| t.parse::<FormPreset>().ok())
            .filter(|preset| *preset != FormPreset::General)
    }

    /// The service category, if the `service` parameter names a known one
    pub fn service_category(&self) -> Option<ServiceCategory> {
        self.service.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Named contact form configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPreset {
    /// Request a quote for a course
    Quote,
    /// Ask to be called back
    Callback,
    /// Book a course date
    Booking,
    #[default]
    General,
}

impl FormPreset {
    pub const ALL: [FormPreset; 4] = [
        FormPreset::Quote,
        FormPreset::Callback,
        FormPreset::Booking,
        FormPreset::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormPreset::Quote => "quote",
            FormPreset::Callback => "callback",
            FormPreset::Booking => "booking",
            FormPreset::General => "general",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            FormPreset::Quote => "Begär offert",
            FormPreset::Callback => "Bli uppringd",
            FormPreset::Booking => "Boka utbildning",
            FormPreset::General => DEFAULT_HEADING,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FormPreset::Quote => {
                "Berätta om era behov så skickar vi en offert inom 24 timmar."
            }
            FormPreset::Callback => "Lämna ditt telefonnummer så ringer vi upp dig.",
            FormPreset::Booking => {
                "Välj utbildning och önskat datum så bekräftar vi bokningen."
            }
            FormPreset::General => DEFAULT_DESCRIPTION,
        }
    }

    /// Label on the submit button
    pub fn submit_label(self) -> &'static str {
        match self {
            FormPreset::Quote => "Skicka offertförfrågan",
            FormPreset::Callback => "Ring upp mig",
            FormPreset::Booking => "Skicka bokningsförfrågan",
            FormPreset::General => "Skicka meddelande",
        }
    }
}

impl fmt::Display for FormPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        FormPreset::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown form type '{}'", s))
    }
}

/// Service category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    Brandskydd,
    ForstaHjalpen,
    Hlr,
    Arbetsmiljo,
    HetaArbeten,
    Elsakerhet,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Brandskydd,
        ServiceCategory::ForstaHjalpen,
        ServiceCategory::Hlr,
        ServiceCategory::Arbetsmiljo,
        ServiceCategory::HetaArbeten,
        ServiceCategory::Elsakerhet,
    ];

    /// URL slug
    pub fn slug(self) -> &'static str {
        match self {
            ServiceCategory::Brandskydd => "brandskydd",
            ServiceCategory::ForstaHjalpen => "forsta-hjalpen",
            ServiceCategory::Hlr => "hlr",
            ServiceCategory::Arbetsmiljo => "arbetsmiljo",
            ServiceCategory::HetaArbeten => "heta-arbeten",
            ServiceCategory::Elsakerhet => "elsakerhet",
        }
    }

    /// Swedish display label
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Brandskydd => "Brandskydd",
            ServiceCategory::ForstaHjalpen => "Första hjälpen",
            ServiceCategory::Hlr => "HLR",
            ServiceCategory::Arbetsmiljo => "Arbetsmiljö",
            ServiceCategory::HetaArbeten => "Heta arbeten",
            ServiceCategory::Elsakerhet => "Elsäkerhet",
        }
    }

    /// Label as it reads inside a sentence
    fn label_in_sentence(self) -> &'static str {
        match self {
            ServiceCategory::Hlr => "HLR",
            ServiceCategory::Brandskydd => "brandskydd",
            ServiceCategory::ForstaHjalpen => "första hjälpen",
            ServiceCategory::Arbetsmiljo => "arbetsmiljö",
            ServiceCategory::HetaArbeten => "heta arbeten",
            ServiceCategory::Elsakerhet => "elsäkerhet",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ServiceCategory::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == s)
            .ok_or_else(|| format!("unknown service category '{}'", s))
    }
}

/// Page heading for a contact query
pub fn heading(query: &ContactQuery) -> String {
    if let Some(preset) = query.preset_override() {
        return preset.heading().to_string();
    }
    if let Some(category) = query.service_category() {
        return format!("Kontakta oss om {}", category.label());
    }
    DEFAULT_HEADING.to_string()
}

/// Page description for a contact query
pub fn description(query: &ContactQuery) -> String {
    if let Some(preset) = query.preset_override() {
        return preset.description().to_string();
    }
    if let Some(product) = query.product.as_deref() {
        return format!(
            "Du har valt {}. Fyll i dina uppgifter så återkommer vi med mer information.",
            product
        );
    }
    if let Some(category) = query.service_category() {
        return format!(
            "Vill du veta mer om våra utbildningar inom {}? Fyll i formuläret så hjälper vi dig att hitta rätt.",
            category.label_in_sentence()
        );
    }
    DEFAULT_DESCRIPTION.to_string()
}
