//! Per-type block components
//!
//! Each function renders the inner markup of one block type. Layout
//! concerns shared by all blocks live in [`super::wrapper`].

use crate::contact::{ContactFormConfig, FormField, ServiceCategory};
use crate::core::block::{
    ContactFormBlock, CtaBlock, FaqBlock, FeaturesBlock, HeroBlock, ImagePosition, ImageRef,
    ImageTextBlock, Link, ServicesBlock, StatsBlock, TestimonialsBlock, TextBlock,
};

use super::html::{escape_html, paragraphs, safe_href};

fn heading(tag: &str, text: &str, class: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    format!("<{tag} class=\"{class}\">{}</{tag}>", escape_html(text))
}

fn image(img: &ImageRef, class: &str) -> String {
    if img.url.trim().is_empty() {
        return String::new();
    }
    format!(
        "<img src=\"{}\" alt=\"{}\" class=\"{}\" loading=\"lazy\">",
        safe_href(&img.url),
        escape_html(&img.alt),
        class
    )
}

fn button(link: &Link, class: &str) -> String {
    if link.label.trim().is_empty() {
        return String::new();
    }
    format!(
        "<a href=\"{}\" class=\"{}\">{}</a>",
        safe_href(&link.href),
        class,
        escape_html(&link.label)
    )
}

pub fn hero(block: &HeroBlock) -> String {
    let mut out = String::from("<div class=\"hero grid gap-8 md:grid-cols-2 items-center\"><div>");
    out.push_str(&heading("h1", &block.title, "text-4xl font-bold md:text-5xl"));
    if !block.subtitle.trim().is_empty() {
        out.push_str(&format!(
            "<p class=\"mt-4 text-lg\">{}</p>",
            escape_html(&block.subtitle)
        ));
    }
    let buttons: String = [
        block.primary_cta.as_ref().map(|l| button(l, "btn btn-primary")),
        block.secondary_cta.as_ref().map(|l| button(l, "btn btn-outline")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !buttons.is_empty() {
        out.push_str(&format!("<div class=\"mt-8 flex gap-4\">{}</div>", buttons));
    }
    out.push_str("</div>");
    if let Some(img) = &block.image {
        out.push_str(&image(img, "rounded-lg w-full"));
    }
    out.push_str("</div>");
    out
}

pub fn text(block: &TextBlock) -> String {
    let mut out = String::from("<div class=\"prose\">");
    if let Some(h) = &block.heading {
        out.push_str(&heading("h2", h, "text-3xl font-bold"));
    }
    out.push_str(&paragraphs(&block.body));
    out.push_str("</div>");
    out
}

pub fn image_text(block: &ImageTextBlock) -> String {
    let order = match block.image_position {
        ImagePosition::Left => "",
        ImagePosition::Right => " md:order-last",
    };
    let mut out = String::from("<div class=\"grid gap-8 md:grid-cols-2 items-center\">");
    out.push_str(&format!("<div class=\"image{}\">", order));
    if let Some(img) = &block.image {
        out.push_str(&image(img, "rounded-lg w-full"));
    }
    out.push_str("</div><div>");
    out.push_str(&heading("h2", &block.heading, "text-3xl font-bold"));
    out.push_str(&paragraphs(&block.body));
    if let Some(link) = &block.link {
        out.push_str(&button(link, "btn btn-link"));
    }
    out.push_str("</div></div>");
    out
}

pub fn features(block: &FeaturesBlock) -> String {
    let columns = block.columns.clamp(1, 4);
    let mut out = heading("h2", &block.heading, "text-3xl font-bold text-center");
    if !block.intro.trim().is_empty() {
        out.push_str(&format!("<p class=\"intro\">{}</p>", escape_html(&block.intro)));
    }
    out.push_str(&format!("<ul class=\"grid gap-6 md:grid-cols-{}\">", columns));
    for item in &block.items {
        out.push_str(&format!(
            "<li class=\"feature\"><span class=\"icon\" data-icon=\"{}\"></span>{}<p>{}</p></li>",
            escape_html(&item.icon),
            heading("h3", &item.title, "font-semibold"),
            escape_html(&item.description)
        ));
    }
    out.push_str("</ul>");
    out
}

pub fn services(block: &ServicesBlock) -> String {
    let category = block
        .category
        .as_deref()
        .and_then(|c| c.parse::<ServiceCategory>().ok());
    let mut out = match category {
        Some(c) => format!("<div class=\"services\" data-category=\"{}\">", c.slug()),
        None => String::from("<div class=\"services\">"),
    };
    out.push_str(&heading("h2", &block.heading, "text-3xl font-bold"));
    if !block.intro.trim().is_empty() {
        out.push_str(&format!("<p class=\"intro\">{}</p>", escape_html(&block.intro)));
    }
    out.push_str("<ul class=\"grid gap-6 md:grid-cols-3\">");
    for card in &block.items {
        out.push_str("<li class=\"card\">");
        if let Some(img) = &card.image {
            out.push_str(&image(img, "card-image"));
        }
        out.push_str(&heading("h3", &card.title, "font-semibold"));
        out.push_str(&format!("<p>{}</p>", escape_html(&card.description)));
        if !card.href.trim().is_empty() {
            out.push_str(&format!(
                "<a href=\"{}\" class=\"btn btn-link\">Läs mer</a>",
                safe_href(&card.href)
            ));
        }
        out.push_str("</li>");
    }
    out.push_str("</ul></div>");
    out
}

pub fn stats(block: &StatsBlock) -> String {
    let mut out = heading("h2", &block.heading, "text-3xl font-bold text-center");
    out.push_str("<dl class=\"stats grid gap-6 md:grid-cols-4\">");
    for item in &block.items {
        out.push_str(&format!(
            "<div><dt>{}</dt><dd class=\"text-4xl font-bold\">{}</dd></div>",
            escape_html(&item.label),
            escape_html(&item.value)
        ));
    }
    out.push_str("</dl>");
    out
}

pub fn testimonials(block: &TestimonialsBlock) -> String {
    let mut out = heading("h2", &block.heading, "text-3xl font-bold text-center");
    out.push_str("<div class=\"testimonials grid gap-6 md:grid-cols-2\">");
    for t in &block.items {
        let byline: Vec<&str> = [t.role.as_str(), t.company.as_str()]
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        out.push_str(&format!(
            "<figure><blockquote>{}</blockquote><figcaption><strong>{}</strong>",
            escape_html(&t.quote),
            escape_html(&t.author)
        ));
        if !byline.is_empty() {
            out.push_str(&format!("<span>{}</span>", escape_html(&byline.join(", "))));
        }
        out.push_str("</figcaption></figure>");
    }
    out.push_str("</div>");
    out
}

pub fn faq(block: &FaqBlock) -> String {
    let mut out = heading("h2", &block.heading, "text-3xl font-bold");
    out.push_str("<div class=\"faq\">");
    for item in &block.items {
        out.push_str(&format!(
            "<details><summary>{}</summary>{}</details>",
            escape_html(&item.question),
            paragraphs(&item.answer)
        ));
    }
    out.push_str("</div>");
    out
}

pub fn cta(block: &CtaBlock) -> String {
    let mut out = String::from("<div class=\"cta text-center\">");
    out.push_str(&heading("h2", &block.heading, "text-3xl font-bold"));
    if !block.text.trim().is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&block.text)));
    }
    out.push_str(&button(&block.button, "btn btn-primary mt-6"));
    out.push_str("</div>");
    out
}

pub fn contact_form(block: &ContactFormBlock) -> String {
    let mut config = ContactFormConfig::for_preset(block.preset);
    if !block.heading.trim().is_empty() {
        config.heading = block.heading.clone();
    }
    if !block.description.trim().is_empty() {
        config.description = block.description.clone();
    }
    config.service = block
        .service
        .as_deref()
        .and_then(|s| s.parse::<ServiceCategory>().ok());
    contact_form_markup(&config)
}

/// Form markup for a resolved contact form configuration
pub fn contact_form_markup(config: &ContactFormConfig) -> String {
    let mut out = heading("h2", &config.heading, "text-3xl font-bold");
    out.push_str(&format!("<p>{}</p>", escape_html(&config.description)));
    out.push_str(&format!(
        "<form method=\"post\" action=\"/api/contact\" class=\"contact-form\" data-preset=\"{}\">",
        config.preset
    ));
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"preset\" value=\"{}\">",
        config.preset
    ));

    for fc in &config.fields {
        let name = fc.field.name();
        let required = if fc.required { " required" } else { "" };
        let marker = if fc.required { " *" } else { "" };
        out.push_str(&format!(
            "<label for=\"cf-{name}\">{}{marker}</label>",
            escape_html(fc.field.label())
        ));

        match fc.field {
            FormField::Service => {
                out.push_str(&format!("<select id=\"cf-{name}\" name=\"{name}\"{required}>"));
                out.push_str("<option value=\"\">Välj område</option>");
                for category in ServiceCategory::ALL {
                    let selected = if config.service == Some(category) { " selected" } else { "" };
                    out.push_str(&format!(
                        "<option value=\"{}\"{selected}>{}</option>",
                        category.slug(),
                        escape_html(category.label())
                    ));
                }
                out.push_str("</select>");
            }
            FormField::Message => {
                let prefill = config.prefilled_message.as_deref().unwrap_or_default();
                out.push_str(&format!(
                    "<textarea id=\"cf-{name}\" name=\"{name}\" rows=\"5\"{required}>{}</textarea>",
                    escape_html(prefill)
                ));
            }
            field => {
                let input_type = field.input_type().unwrap_or("text");
                out.push_str(&format!(
                    "<input id=\"cf-{name}\" type=\"{input_type}\" name=\"{name}\"{required}>"
                ));
            }
        }
    }

    out.push_str(&format!(
        "<button type=\"submit\" class=\"btn btn-primary\">{}</button></form>",
        escape_html(config.preset.submit_label())
    ));
    out
}
