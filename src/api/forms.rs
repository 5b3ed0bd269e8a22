use std::collections::HashMap;

use crate::error::AppError;
use crate::slug::slugify;

/// Form-encoded request body.
///
/// The admin front-end posts url-encoded strings without always setting the
/// matching content type, so the body is parsed whatever the header says.
/// When a key repeats, the first value wins.
#[derive(Debug, Default)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body) {
            values
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// A field that must be present and non-empty.
    pub fn required(&self, key: &str) -> Result<String, AppError> {
        self.get(key)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest(format!("{key} is required")))
    }
}

/// Validated input for creating or editing a blog post or page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentInput {
    pub title: String,
    pub content: String,
    /// Slugified `Slug` field; `None` when the form had none and none was required.
    pub slug: Option<String>,
    pub tags: Vec<String>,
    /// `None` when the form did not mention publication.
    pub published: Option<bool>,
}

impl ContentInput {
    /// Validate `Title`, `Content` and, when `require_slug` is set, `Slug`.
    ///
    /// Checks run in that order and the first missing field is reported.
    pub fn from_form(fields: &FormFields, require_slug: bool) -> Result<Self, AppError> {
        let title = fields.required("Title")?;
        let content = fields.required("Content")?;
        let slug = if require_slug {
            Some(slugify(&fields.required("Slug")?))
        } else {
            fields.get("Slug").filter(|s| !s.is_empty()).map(slugify)
        };

        Ok(Self {
            title,
            content,
            slug,
            tags: parse_tags(fields.get("Tags")),
            published: parse_published(fields.get("Published"))?,
        })
    }
}

/// Split a comma separated tag list, trimming blanks and dropping empties.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse the optional `Published` flag.
pub fn parse_published(raw: Option<&str>) -> Result<Option<bool>, AppError> {
    match raw.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") => Ok(None),
        Some("true" | "1" | "on" | "yes") => Ok(Some(true)),
        Some("false" | "0" | "off" | "no") => Ok(Some(false)),
        Some(other) => Err(AppError::BadRequest(format!(
            "Invalid Published value '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlencoded() {
        let fields = FormFields::parse(b"Title=Hello+World&Content=h1.%20Hi&Title=Ignored");
        assert_eq!(fields.get("Title"), Some("Hello World"));
        assert_eq!(fields.get("Content"), Some("h1. Hi"));
        assert_eq!(fields.get("Slug"), None);
    }

    #[test]
    fn test_required_rejects_empty() {
        let fields = FormFields::parse(b"Title=&Content=x");
        match fields.required("Title") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Title is required"),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
    }

    #[test]
    fn test_content_input_order_of_checks() {
        let fields = FormFields::parse(b"Slug=x");
        match ContentInput::from_form(&fields, true) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Title is required"),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }

        let fields = FormFields::parse(b"Title=T");
        match ContentInput::from_form(&fields, true) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Content is required"),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }

        let fields = FormFields::parse(b"Title=T&Content=C");
        match ContentInput::from_form(&fields, true) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Slug is required"),
            other => panic!("Expected BadRequest error, got: {:?}", other),
        }
    }

    #[test]
    fn test_content_input_full() {
        let fields = FormFields::parse(
            b"Title=About+Me&Content=Hi&Slug=About++Me&Tags=%20a%2C%2Cb%20%2C&Published=false",
        );
        let input = ContentInput::from_form(&fields, true).unwrap();
        assert_eq!(input.title, "About Me");
        assert_eq!(input.slug.as_deref(), Some("about-me"));
        assert_eq!(input.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(input.published, Some(false));
    }

    #[test]
    fn test_slug_optional_when_not_required() {
        let fields = FormFields::parse(b"Title=T&Content=C");
        let input = ContentInput::from_form(&fields, false).unwrap();
        assert_eq!(input.slug, None);
        assert_eq!(input.published, None);
        assert!(input.tags.is_empty());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(None), Vec::<String>::new());
        assert_eq!(parse_tags(Some("")), Vec::<String>::new());
        assert_eq!(
            parse_tags(Some("rust, web ,, cms")),
            vec!["rust".to_string(), "web".to_string(), "cms".to_string()]
        );
    }

    #[test]
    fn test_parse_published() {
        assert_eq!(parse_published(None).unwrap(), None);
        assert_eq!(parse_published(Some("on")).unwrap(), Some(true));
        assert_eq!(parse_published(Some("FALSE")).unwrap(), Some(false));
        assert!(parse_published(Some("maybe")).is_err());
    }
}
