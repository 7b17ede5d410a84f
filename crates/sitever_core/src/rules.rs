//! Named text substitution rules for version-sensitive references.
//!
//! Rules run in a fixed order over the whole file content:
//!
//! 1. `layout-default`: `layout: default` → `layout: default_v<ver>`
//! 2. `layout-page`: `layout: page` → `layout: page_v<ver>`
//! 3. `layout-post`: `layout: post` → `layout: post_v<ver>`
//! 4. `include`: `{% include name.html %}` → `{% include name_v<ver>.html %}`
//! 5. `stylesheet`: `href="...hyde.css?x"` →
//!    `href="{ site.baseurl }public/css/hyde_v<ver>.css?x"`
//!
//! Each pattern also accepts a target that already carries a `_v<token>`
//! tag, split at the first `_v` the same way renamed files are, so rewriting
//! is idempotent and follows version bumps from any earlier version.

use std::borrow::Cow;

use regex::Regex;

use crate::error::{VersionError, VersionResult};
use crate::version::Version;

/// Layout names rewritten by the layout rules, in application order.
pub const LAYOUT_NAMES: [&str; 3] = ["default", "page", "post"];

/// A regex and the replacement template applied to every match.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    /// `replacement` may reference capture groups as `${1}`.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> VersionResult<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| VersionError::InvalidRule {
            rule: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }

    pub fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        self.pattern
            .replace_all(content, self.replacement.as_str())
    }
}

/// An ordered list of substitution rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }

    /// The reference rules for `version`.
    pub fn for_version(version: &Version) -> VersionResult<Self> {
        // `$` is special in replacement templates.
        let literal = version.as_str().replace('$', "$$");

        let mut rules = Vec::with_capacity(LAYOUT_NAMES.len() + 2);

        for layout in LAYOUT_NAMES {
            rules.push(SubstitutionRule::new(
                format!("layout-{}", layout),
                &format!(r"layout:\s*{}(?:_v\S+|\b)", layout),
                format!("layout: {}_v{}", layout, literal),
            )?);
        }

        rules.push(SubstitutionRule::new(
            "include",
            r"\{%\s*include\s+([^}]+?)(?:_v[^}\s]*?)?\.html\s*%\}",
            format!("{{% include ${{1}}_v{}.html %}}", literal),
        )?);

        rules.push(SubstitutionRule::new(
            "stylesheet",
            r#"href="[^"]*hyde(?:_v[^"]*?)?\.css([^"]*)""#,
            format!(
                r#"href="{{ site.baseurl }}public/css/hyde_v{}.css${{1}}""#,
                literal
            ),
        )?);

        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: SubstitutionRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in order over `content`.
    pub fn apply(&self, content: &str) -> String {
        let mut current = content.to_string();
        for rule in &self.rules {
            if rule.is_match(&current) {
                current = rule.apply(&current).into_owned();
            }
        }
        current
    }
}
