//! Starter files written by `facets init`.
//!
//! The templates under `templates/` are complete, valid TOML so that tests can
//! check them against the parser. They are handed out commented out, which
//! makes a fresh file behave exactly like no file at all.

/// Template for a project `.facets.toml`.
const LOCAL: &str = include_str!("../templates/config.toml");

/// Template for `~/.facets.toml`.
const GLOBAL: &str = include_str!("../templates/config-global.toml");

/// Returns the project template, commented out.
pub fn local_template() -> String {
    comment_out(LOCAL)
}

/// Returns the home directory template, commented out.
pub fn global_template() -> String {
    comment_out(GLOBAL)
}

/// Prefixes every setting and table header with `# `.
fn comment_out(template: &str) -> String {
    template
        .lines()
        .map(|line| match line {
            "" => "\n".to_string(),
            comment if comment.starts_with('#') => format!("{comment}\n"),
            setting => format!("# {setting}\n"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    #[test]
    fn raw_templates_are_valid_config() {
        for (name, raw) in [("local", LOCAL), ("global", GLOBAL)] {
            let parsed = parse_config(raw);
            assert!(parsed.is_ok(), "{name} template: {parsed:?}");
        }
    }

    #[test]
    fn raw_local_template_names_every_section() {
        let config = parse_config(LOCAL).unwrap();
        assert_eq!(config.root, Some(false));
        assert!(config.sources.is_some());
        assert!(config.filters.is_some());
        assert!(config.display.is_some());
    }

    #[test]
    fn rendered_templates_set_nothing() {
        for rendered in [local_template(), global_template()] {
            let config = parse_config(&rendered).unwrap();
            assert!(config.root.is_none());
            assert!(config.tree.is_none());
            assert!(config.sources.is_none());
            assert!(config.display.is_none());
        }
    }

    #[test]
    fn comment_out_keeps_blank_lines_and_comments() {
        assert_eq!(
            comment_out("# note\n[display]\n\nlanguage = \"he\"\n"),
            "# note\n# [display]\n\n# language = \"he\"\n"
        );
    }
}
