//! Inline style declarations
//!
//! Parses the value of a `style` attribute into ordered `property: value` pairs. Property names
//! are lower-cased; values are kept verbatim (trimmed). No validation happens here, that is the
//! job of [`crate::common::style_filter`].

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    pub fn parse(text: &str) -> Self {
        let mut style = Style::default();
        for entry in text.split(';') {
            let Some((property, value)) = entry.split_once(':') else {
                continue;
            };
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                continue;
            }
            style.set(&property, value);
        }
        style
    }

    /// Set a property, replacing any previous value in place.
    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.declarations.push((property, value.to_string())),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// True when `property` holds exactly `value` (ASCII case-insensitive).
    pub fn has(&self, property: &str, value: &str) -> bool {
        self.get(property)
            .is_some_and(|v| v.eq_ignore_ascii_case(value))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialized declaration text, `color: red; width: 10px;`.
    pub fn css_text(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
