//! URL slugs for module actions.

use std::collections::HashMap;

/// Turns a module action name into the URL segment appended to block links.
pub trait Slugifier: Send + Sync {
    /// URL segment for `action` in `language`.
    fn action_slug(&self, action: &str, language: &str) -> String;
}

/// Table-driven action slugs.
///
/// Action names are camel-cased (`article_detail` becomes `ArticleDetail`)
/// and looked up in the language's table. Actions missing from the table
/// fall back to kebab case (`article-detail`).
#[derive(Clone, Debug, Default)]
pub struct ActionSlugs {
    tables: HashMap<String, HashMap<String, String>>,
}

impl ActionSlugs {
    /// Create a slugifier without translations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slug table of a language, keyed by camel-cased action name.
    #[must_use]
    pub fn with_language(
        mut self,
        language: impl Into<String>,
        table: HashMap<String, String>,
    ) -> Self {
        self.tables.insert(language.into(), table);
        self
    }
}

impl From<HashMap<String, HashMap<String, String>>> for ActionSlugs {
    fn from(tables: HashMap<String, HashMap<String, String>>) -> Self {
        Self { tables }
    }
}

impl Slugifier for ActionSlugs {
    fn action_slug(&self, action: &str, language: &str) -> String {
        let camel = to_camel_case(action);
        if let Some(slug) = self.tables.get(language).and_then(|t| t.get(&camel)) {
            return slug.clone();
        }
        to_kebab_case(&camel)
    }
}

/// Convert `snake_case` to `CamelCase`. Already camel-cased input is kept.
fn to_camel_case(value: &str) -> String {
    value
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

/// Convert `CamelCase` to `kebab-case`.
fn to_kebab_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for (i, c) in value.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("detail"), "Detail");
        assert_eq!(to_camel_case("article_detail"), "ArticleDetail");
        assert_eq!(to_camel_case("ArticleDetail"), "ArticleDetail");
        assert_eq!(to_camel_case("_archive_"), "Archive");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("Detail"), "detail");
        assert_eq!(to_kebab_case("ArticleDetail"), "article-detail");
    }

    #[test]
    fn test_action_slug_uses_language_table() {
        let slugs = ActionSlugs::new().with_language(
            "nl",
            HashMap::from([("ArticleArchive".to_owned(), "archief".to_owned())]),
        );

        assert_eq!(slugs.action_slug("article_archive", "nl"), "archief");
        assert_eq!(slugs.action_slug("ArticleArchive", "nl"), "archief");
    }

    #[test]
    fn test_action_slug_falls_back_to_kebab_case() {
        let slugs = ActionSlugs::new().with_language(
            "nl",
            HashMap::from([("ArticleArchive".to_owned(), "archief".to_owned())]),
        );

        assert_eq!(slugs.action_slug("article_archive", "en"), "article-archive");
        assert_eq!(slugs.action_slug("detail", "nl"), "detail");
    }
}
