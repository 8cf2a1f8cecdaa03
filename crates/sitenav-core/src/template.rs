//! Menu markup rendering.

use std::path::PathBuf;

use minijinja::{Environment, ErrorKind, context};

use crate::error::TemplateError;
use crate::menu::MenuEntry;

/// Built-in templates, overridable by a template directory.
const BUILTIN_TEMPLATES: &[(&str, &str)] =
    &[("navigation.html", include_str!("templates/navigation.html"))];

/// Renders one menu level to markup.
///
/// Templates receive a single `navigation` binding: the entries of the
/// level, with nested levels already rendered into each entry's `children`.
pub trait TemplateRenderer: Send + Sync {
    /// Render `navigation` with the template named `template`.
    fn render(&self, template: &str, navigation: &[MenuEntry]) -> Result<String, TemplateError>;
}

/// Jinja templates backed by `minijinja`.
///
/// Names ending in `.html` are auto-escaped, so nested markup must be
/// emitted with the `safe` filter.
#[derive(Debug)]
pub struct JinjaTemplates {
    env: Environment<'static>,
}

impl Default for JinjaTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl JinjaTemplates {
    /// Templates with only the built-in set available.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Templates loaded from `dir`, falling back to the built-in set.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self::build(Some(dir.into()))
    }

    fn build(dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();
        let custom = dir.map(minijinja::path_loader);
        env.set_loader(move |name| {
            if let Some(load) = &custom
                && let Some(source) = load(name)?
            {
                return Ok(Some(source));
            }
            Ok(BUILTIN_TEMPLATES
                .iter()
                .find(|(builtin, _)| *builtin == name)
                .map(|(_, source)| (*source).to_owned()))
        });
        Self { env }
    }
}

impl TemplateRenderer for JinjaTemplates {
    fn render(&self, template: &str, navigation: &[MenuEntry]) -> Result<String, TemplateError> {
        let tmpl = self.env.get_template(template).map_err(|err| {
            if err.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound(template.to_owned())
            } else {
                TemplateError::Render(Box::new(err))
            }
        })?;
        tmpl.render(context! { navigation => navigation })
            .map_err(|err| TemplateError::Render(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use sitenav_graph::PageId;

    use super::*;

    fn entry(id: u32, title: &str, link: &str) -> MenuEntry {
        MenuEntry {
            page_id: PageId(id),
            parent_id: PageId::ROOT,
            title: title.to_owned(),
            navigation_title: title.to_owned(),
            link: link.to_owned(),
            selected: false,
            nofollow: false,
            depth: 1,
            children: None,
        }
    }

    #[test]
    fn test_builtin_navigation_template() {
        let templates = JinjaTemplates::new();
        let mut about = entry(5, "About", "/about");
        about.selected = true;
        let mut blog = entry(6, "Blog", "/blog");
        blog.nofollow = true;

        let html = templates.render("navigation.html", &[about, blog]).unwrap();

        assert!(html.starts_with("<ul>"));
        assert!(html.contains(r#"<li class="selected">"#));
        assert!(html.contains(r#"title="About">About</a>"#));
        assert!(html.contains(r#"title="Blog" rel="nofollow">Blog</a>"#));
    }

    #[test]
    fn test_titles_are_escaped() {
        let templates = JinjaTemplates::new();

        let html = templates
            .render("navigation.html", &[entry(5, "R&D <lab>", "/rd")])
            .unwrap();

        assert!(html.contains("R&amp;D &lt;lab&gt;"));
    }

    #[test]
    fn test_nested_markup_is_not_escaped() {
        let templates = JinjaTemplates::new();
        let mut about = entry(5, "About", "/about");
        about.children = Some("<ul><li>Team</li></ul>".to_owned());

        let html = templates.render("navigation.html", &[about]).unwrap();

        assert!(html.contains("<ul><li>Team</li></ul>"));
    }

    #[test]
    fn test_unknown_template() {
        let templates = JinjaTemplates::new();

        let err = templates.render("sidebar.html", &[]).unwrap_err();

        assert!(matches!(err, TemplateError::NotFound(ref name) if name == "sidebar.html"));
    }

    #[test]
    fn test_template_dir_overrides_builtin() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("navigation.html"),
            "{% for item in navigation %}[{{ item.page_id }}]{% endfor %}",
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("footer.html"),
            "{{ navigation|length }} links",
        )
        .unwrap();
        let templates = JinjaTemplates::with_dir(temp_dir.path());

        let nav = templates
            .render("navigation.html", &[entry(5, "About", "/about")])
            .unwrap();
        let footer = templates.render("footer.html", &[]).unwrap();

        assert_eq!(nav, "[5]");
        assert_eq!(footer, "0 links");
    }

    #[test]
    fn test_template_syntax_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("broken.html"), "{% for %}").unwrap();
        let templates = JinjaTemplates::with_dir(temp_dir.path());

        let err = templates.render("broken.html", &[]).unwrap_err();

        assert!(matches!(err, TemplateError::Render(_)));
    }
}
