//! Anonymous-allowed path set.

#[cfg(feature = "config")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How a request path is compared against whitelist entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PathMatching {
    /// Case-insensitive match on the end of the raw request path.
    ///
    /// Also admits any path that merely ends with an entry, so `/login`
    /// admits `/admin/login`.
    #[default]
    Suffix,
    /// The normalized path equals an entry.
    Exact,
    /// The normalized path equals an entry or continues it past a `/`.
    Prefix,
}

impl PathMatching {
    /// Returns the matching mode as a string for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suffix => "suffix",
            Self::Exact => "exact",
            Self::Prefix => "prefix",
        }
    }
}

/// Set of paths the route guard admits without credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathWhitelist {
    entries: Vec<String>,
    matching: PathMatching,
}

impl PathWhitelist {
    /// Creates a whitelist from explicit entries.
    ///
    /// Blank entries are ignored.
    pub fn new<I, P>(entries: I, matching: PathMatching) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|entry| {
                let entry = entry.as_ref().trim();
                (!entry.is_empty()).then(|| Self::normalize(entry, matching))
            })
            .collect();

        Self { entries, matching }
    }

    /// Returns the matching mode.
    #[inline]
    pub fn matching(&self) -> PathMatching {
        self.matching
    }

    /// Returns the normalized entries.
    #[inline]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns `true` if `path` may be served without credentials.
    pub fn is_allowed(&self, path: &str) -> bool {
        if self.entries.is_empty() {
            return false;
        }

        let path = Self::normalize(path, self.matching);
        self.entries.iter().any(|entry| match self.matching {
            PathMatching::Suffix => path.ends_with(entry.as_str()),
            PathMatching::Exact => path == *entry,
            PathMatching::Prefix => {
                entry == "/"
                    || path
                        .strip_prefix(entry.as_str())
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            }
        })
    }

    fn normalize(path: &str, matching: PathMatching) -> String {
        match matching {
            PathMatching::Suffix => path.to_lowercase(),
            PathMatching::Exact | PathMatching::Prefix => {
                let trimmed = path.trim_end_matches('/');
                if trimmed.is_empty() {
                    "/".to_owned()
                } else if trimmed.starts_with('/') {
                    trimmed.to_owned()
                } else {
                    format!("/{trimmed}")
                }
            }
        }
    }
}
