use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderValue, ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
    middleware::Next,
    web, Error,
};

use std::collections::HashMap;

use crate::config::I18nSettings;

/// Pick the response language
///
/// Order: explicit `lang` query parameter, then the supported tag with the
/// highest `q` weight in `Accept-Language` (equal weights keep header order),
/// then the configured default. Region subtags are ignored (`hi-IN` counts as
/// `hi`) and `q=0` tags are never picked.
pub fn negotiate_language(
    lang_param: Option<&str>,
    accept_language: Option<&str>,
    settings: &I18nSettings,
) -> String {
    let supported = |tag: &str| -> Option<String> {
        let primary = tag.split(['-', '_']).next()?.trim().to_lowercase();
        settings
            .supported_languages
            .iter()
            .find(|lang| lang.eq_ignore_ascii_case(&primary))
            .map(|lang| lang.to_string())
    };

    if let Some(lang) = lang_param.and_then(supported) {
        return lang;
    }

    let mut weighted: Vec<(&str, f32)> = accept_language
        .into_iter()
        .flat_map(|header| header.split(','))
        .filter_map(weighted_tag)
        .filter(|(_, q)| *q > 0.0)
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

    weighted
        .into_iter()
        .find_map(|(tag, _)| supported(tag))
        .unwrap_or_else(|| settings.default_language.clone())
}

/// Split `ta-IN;q=0.8` into the tag and its weight (1.0 when absent)
fn weighted_tag(part: &str) -> Option<(&str, f32)> {
    let mut pieces = part.split(';');
    let tag = pieces.next()?.trim();
    if tag.is_empty() {
        return None;
    }

    let q = pieces
        .filter_map(|param| param.trim().strip_prefix("q="))
        .find_map(|value| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0);

    Some((tag, q))
}

/// Decoded `lang` query parameter, parsed the same way handlers parse queries
fn lang_query_param(query: &str) -> Option<String> {
    web::Query::<HashMap<String, String>>::from_query(query)
        .ok()
        .and_then(|params| params.into_inner().remove("lang"))
}

/// Stamp `Content-Language` on every response
pub async fn content_language(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let language = {
        let settings = req
            .app_data::<web::Data<I18nSettings>>()
            .cloned()
            .unwrap_or_else(|| web::Data::new(I18nSettings::default()));
        let accept = req
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        let lang = lang_query_param(req.query_string());

        negotiate_language(lang.as_deref(), accept, &settings)
    };

    let mut res = next.call(req).await?;

    if let Ok(value) = HeaderValue::from_str(&language) {
        res.headers_mut().insert(CONTENT_LANGUAGE, value);
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_wins() {
        let settings = I18nSettings::default();
        assert_eq!(negotiate_language(Some("kn"), Some("hi-IN,hi;q=0.9"), &settings), "kn");
    }

    #[test]
    fn test_accept_language_fallback() {
        let settings = I18nSettings::default();
        assert_eq!(negotiate_language(None, Some("fr-FR, ta-IN;q=0.8, en;q=0.5"), &settings), "ta");
        assert_eq!(negotiate_language(Some("xx"), Some("HI"), &settings), "hi");
    }

    #[test]
    fn test_default_language() {
        let settings = I18nSettings::default();
        assert_eq!(negotiate_language(None, None, &settings), "en");
        assert_eq!(negotiate_language(None, Some("de, fr"), &settings), "en");
    }

    #[test]
    fn test_lang_query_param() {
        assert_eq!(lang_query_param("latitude=1&lang=mr").as_deref(), Some("mr"));
        assert_eq!(lang_query_param("lang=%68%69").as_deref(), Some("hi"));
        assert_eq!(lang_query_param("latitude=1"), None);
    }

    #[test]
    fn test_accept_language_weights() {
        let settings = I18nSettings::default();
        assert_eq!(negotiate_language(None, Some("en;q=0.1, hi;q=0.9"), &settings), "hi");
        assert_eq!(negotiate_language(None, Some("ta;q=0.5, mr;q=0.5"), &settings), "ta");
        assert_eq!(negotiate_language(None, Some("hi;q=0, kn"), &settings), "kn");
        assert_eq!(negotiate_language(None, Some("hi;q=0"), &settings), "en");
    }
}
