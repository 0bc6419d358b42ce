//! Tests for contact page copy derivation

#[cfg(test)]
mod contact_tests {
    use crate::contact::{
        self, ContactFormConfig, ContactQuery, FormField, FormPreset, ServiceCategory,
        DEFAULT_DESCRIPTION, DEFAULT_HEADING,
    };
    use crate::render::components::contact_form_markup;

    /// `type=quote` decides the heading whatever the service says.
    #[test]
    fn test_quote_type_overrides_any_service() {
        for category in ServiceCategory::ALL {
            let q = ContactQuery::parse(&format!("type=quote&service={}", category.slug()));
            assert_eq!(contact::heading(&q), "Begär offert");
        }
        let q = ContactQuery::parse("service=unknown&type=quote");
        assert_eq!(contact::heading(&q), "Begär offert");
    }

    /// A service alone puts its label in the heading.
    #[test]
    fn test_service_only_heading_has_label() {
        let q = ContactQuery::parse("service=brandskydd");
        let heading = contact::heading(&q);
        assert!(heading.contains(ServiceCategory::Brandskydd.label()));
        assert_eq!(heading, "Kontakta oss om Brandskydd");
    }

    /// Every preset override has its own heading and description.
    #[test]
    fn test_each_preset_has_own_copy() {
        for preset in [FormPreset::Quote, FormPreset::Callback, FormPreset::Booking] {
            let q = ContactQuery::parse(&format!("type={}", preset));
            assert_eq!(contact::heading(&q), preset.heading());
            assert_eq!(contact::description(&q), preset.description());
            assert_ne!(contact::heading(&q), DEFAULT_HEADING);
        }
    }

    /// Nothing usable in the query gives the fixed fallback copy.
    #[test]
    fn test_fallback_copy() {
        for qs in ["", "utm_source=mail", "type=&service=", "service=dykning"] {
            let q = ContactQuery::parse(qs);
            assert_eq!(contact::heading(&q), DEFAULT_HEADING, "{qs}");
            assert_eq!(contact::description(&q), DEFAULT_DESCRIPTION, "{qs}");
        }
    }

    /// Service slugs are matched case-insensitively.
    #[test]
    fn test_service_slug_case() {
        let q = ContactQuery::parse("service=Heta-Arbeten");
        assert_eq!(q.service_category(), Some(ServiceCategory::HetaArbeten));
        assert_eq!(contact::heading(&q), "Kontakta oss om Heta arbeten");
    }

    /// The page form is preselected and prefilled from the query.
    #[test]
    fn test_contact_page_markup() {
        let q = ContactQuery::parse("type=booking&service=arbetsmiljo&product=BAM");
        let config = ContactFormConfig::from_query(&q);
        let html = contact_form_markup(&config);

        assert!(html.contains("Boka utbildning"));
        assert!(html.contains("<option value=\"arbetsmiljo\" selected>"));
        assert!(html.contains(">Jag är intresserad av BAM.</textarea>"));
        assert!(html.contains("name=\"preferredDate\""));
        assert!(config.field(FormField::PreferredDate).is_some());
        assert!(html.contains("data-preset=\"booking\""));
    }
}
