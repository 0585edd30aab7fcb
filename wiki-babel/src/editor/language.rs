//! Widget language selection
//!
//! Locale tags arrive as `xx` or `xx-yy`; the widget ships translations named `xx` or `xx_YY`.
//! Tags without a shipped translation fall back to English.

pub const FALLBACK_LANGUAGE: &str = "en";

/// Translations available for the editing widget.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af_ZA", "ar", "be", "bg_BG", "bn_BD", "ca", "cs", "cs_CZ", "cy", "da", "de", "de_AT", "dv",
    "el", "en_CA", "en_GB", "es", "es_MX", "et", "eu", "fa_IR", "fi", "fr_FR", "ga", "gl", "he_IL",
    "hr", "hu_HU", "id", "it", "ja", "ka_GE", "kab", "kk", "km_KH", "ko_KR", "lt", "lv", "nb_NO",
    "nl", "pl", "pt_BR", "pt_PT", "ro", "ru", "sk", "sl_SI", "sr", "sv_SE", "ta", "ta_IN", "th_TH",
    "tr", "tr_TR", "ug", "uk", "uk_UA", "uz", "vi_VN", "zh_CN", "zh_TW",
];

/// `pt-br` → `pt_BR`; unsupported tags → `en`.
pub fn normalize_language(tag: &str) -> String {
    let candidate = match tag.split_once('-') {
        Some((language, region)) => format!("{language}_{}", region.to_uppercase()),
        None => tag.to_string(),
    };
    if SUPPORTED_LANGUAGES.contains(&candidate.as_str()) {
        candidate
    } else {
        FALLBACK_LANGUAGE.to_string()
    }
}
