use regex::Regex;

/// A user ignore filter: `/.../` strings are regular expressions, anything
/// else is a literal path prefix.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    Prefix(String),
    Pattern(Regex),
}

impl IgnoreRule {
    pub fn parse(raw: &str) -> Result<Self, regex::Error> {
        match regex_body(raw) {
            Some(body) => Regex::new(body).map(IgnoreRule::Pattern),
            None => Ok(IgnoreRule::Prefix(raw.to_string())),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            IgnoreRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
            IgnoreRule::Pattern(re) => re.is_match(path),
        }
    }
}

fn regex_body(raw: &str) -> Option<&str> {
    if !(raw.starts_with('/') && raw.ends_with('/')) {
        return None;
    }
    // A lone "/" is both delimiters: the body is empty.
    Some(raw.get(1..raw.len() - 1).unwrap_or(""))
}

/// Ignore filters parsed once per render pass.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Parse raw filters. Filters that fail to compile are logged and skipped.
    pub fn parse<S: AsRef<str>>(filters: &[S]) -> Self {
        let mut rules = Vec::with_capacity(filters.len());
        for raw in filters {
            let raw = raw.as_ref();
            match IgnoreRule::parse(raw) {
                Ok(rule) => rules.push(rule),
                Err(err) => log::warn!("skipping invalid ignore filter {raw:?}: {err}"),
            }
        }
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }
}
