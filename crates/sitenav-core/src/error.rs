//! Error types for navigation rendering.

use sitenav_graph::{NavigationType, PageId, UnknownNavigationType};

/// Structural error raised while building or rendering a menu.
///
/// Missing pages, URLs and blocks are never errors; they resolve to the
/// not-found page instead.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The navigation type name is not one of `page`, `footer`, `meta`.
    #[error("This type ({0}) isn't a valid navigation type. Possible values are: page, footer, meta.")]
    InvalidType(String),
    /// The graph has no tree for a valid navigation type.
    #[error("This type ({0}) isn't a valid navigation type. Possible values are: page, footer, meta.")]
    UnknownType(NavigationType),
    /// The requested parent bucket does not exist.
    #[error("The parent ({parent}) doesn't exist in the {ty} navigation.")]
    MissingParent {
        /// Navigation type that was searched.
        ty: NavigationType,
        /// Requested parent id.
        parent: PageId,
    },
    /// The template renderer failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl From<UnknownNavigationType> for NavigationError {
    fn from(err: UnknownNavigationType) -> Self {
        Self::InvalidType(err.0)
    }
}

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template with this id is known.
    #[error("Template not found: {0}")]
    NotFound(String),
    /// The template engine failed to render.
    #[error("Template render error: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_type_message() {
        let err: NavigationError = "sidebar"
            .parse::<NavigationType>()
            .unwrap_err()
            .into();

        assert!(matches!(err, NavigationError::InvalidType(ref name) if name == "sidebar"));
        assert_eq!(
            err.to_string(),
            "This type (sidebar) isn't a valid navigation type. Possible values are: page, footer, meta."
        );
    }

    #[test]
    fn test_missing_parent_message() {
        let err = NavigationError::MissingParent {
            ty: NavigationType::Page,
            parent: PageId(42),
        };

        assert_eq!(
            err.to_string(),
            "The parent (42) doesn't exist in the page navigation."
        );
    }

    #[test]
    fn test_template_error_is_wrapped() {
        let err: NavigationError = TemplateError::NotFound("menu.html".to_owned()).into();

        assert_eq!(err.to_string(), "Template not found: menu.html");
    }
}
