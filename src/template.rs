//! Rendering of a brand-new CHANGELOG file.

use chrono::NaiveDate;

use crate::domain::VersionNumber;

/// Values filled into a new CHANGELOG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParams {
    /// First released version
    pub version: VersionNumber,
    pub release_date: NaiveDate,
    /// Project web URL, e.g. https://github.com/owner/repo
    pub project_url: String,
}

const HEADER: &str = "# Changelog
All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

";

/// Render a CHANGELOG with an empty Unreleased section and one initial release
pub fn render(params: &TemplateParams) -> String {
    let url = params.project_url.trim_end_matches('/');
    let tag = params.version.format(true);

    let mut text = String::from(HEADER);
    text.push_str("## [Unreleased]\n\n");
    text.push_str(&format!(
        "## [{}] - {}\n### Added\n- Initial release\n\n",
        params.version, params.release_date
    ));
    text.push_str(&format!("[Unreleased]: {}/compare/{}...HEAD\n", url, tag));
    text.push_str(&format!("[{}]: {}/releases/tag/{}\n", params.version, url, tag));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::Changelog;

    fn params() -> TemplateParams {
        TemplateParams {
            version: VersionNumber::new(0, 0, 1),
            release_date: NaiveDate::from_ymd_opt(2021, 1, 16).unwrap(),
            project_url: "https://github.com/atwalsh/kac/".to_string(),
        }
    }

    #[test]
    fn test_render_links() {
        let text = render(&params());
        assert!(text.contains("## [0.0.1] - 2021-01-16\n"));
        assert!(text.ends_with(
            "[Unreleased]: https://github.com/atwalsh/kac/compare/v0.0.1...HEAD\n\
             [0.0.1]: https://github.com/atwalsh/kac/releases/tag/v0.0.1\n"
        ));
    }

    #[test]
    fn test_rendered_template_parses() {
        let changelog = Changelog::parse(&render(&params())).unwrap();
        assert!(!changelog.unreleased().has_changes());
        assert_eq!(changelog.releases().len(), 1);
        assert_eq!(changelog.latest_release().unwrap().changes.added(), ["Initial release"]);
    }
}
