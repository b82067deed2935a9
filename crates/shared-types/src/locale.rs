use serde::{Deserialize, Serialize};

/// Interface languages offered by the language toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// All locales in toggle display order.
pub const ALL_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

impl Locale {
    /// Lowercase code used for storage, cookies and the `lang` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Short label rendered on the toggle buttons.
    pub fn short_label(&self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Es => "ES",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    /// Parse a locale code. Region suffixes are accepted (`es-MX`) and
    /// anything unrecognized falls back to English.
    pub fn from_str_or_default(s: &str) -> Self {
        let primary = s.split(['-', '_']).next().unwrap_or("");
        match primary.trim().to_ascii_lowercase().as_str() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for locale in ALL_LOCALES {
            assert_eq!(Locale::from_str_or_default(locale.as_str()), *locale);
        }
    }

    #[test]
    fn region_tags_resolve_to_language() {
        assert_eq!(Locale::from_str_or_default("es-MX"), Locale::Es);
        assert_eq!(Locale::from_str_or_default("ES_es"), Locale::Es);
        assert_eq!(Locale::from_str_or_default("en-GB"), Locale::En);
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Locale::from_str_or_default("fr"), Locale::En);
        assert_eq!(Locale::from_str_or_default(""), Locale::En);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"es\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
