use std::path::{Component, Path};

/// System and application locations that are never descended into.
const DEFAULT_FRAGMENTS: &[&str] = &[
    "/library",
    "/system",
    "/private",
    "/volumes",
    "/network",
    "/dev",
    "/bin",
    "/sbin",
    "/usr/bin",
    "/usr/sbin",
    "/usr/libexec",
    "/Applications/Xcode.app",
];

/// One denylist entry, stored as lowercased path segments.
///
/// A rule matches a path when, starting at some component of the path,
/// every segment but the last equals the component exactly and the last
/// segment is a prefix of its component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRule {
    segments: Vec<String>,
}

impl SkipRule {
    /// Build a rule from a `/`-separated fragment such as `/usr/bin`.
    /// Returns `None` for a fragment with no segments.
    pub fn new(fragment: &str) -> Option<Self> {
        let segments: Vec<String> = fragment
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn matches_components(&self, components: &[String]) -> bool {
        let n = self.segments.len();
        if components.len() < n {
            return false;
        }
        let (last, init) = match self.segments.split_last() {
            Some(split) => split,
            None => return false,
        };
        (0..=components.len() - n).any(|start| {
            let window = &components[start..start + n];
            window[..n - 1] == *init && window[n - 1].starts_with(last.as_str())
        })
    }
}

/// The set of rules a scan consults before descending into a directory.
#[derive(Debug, Clone)]
pub struct SkipRules {
    rules: Vec<SkipRule>,
}

impl Default for SkipRules {
    fn default() -> Self {
        Self::from_fragments(DEFAULT_FRAGMENTS)
    }
}

impl SkipRules {
    pub fn from_fragments(fragments: &[&str]) -> Self {
        Self {
            rules: fragments.iter().filter_map(|f| SkipRule::new(f)).collect(),
        }
    }

    /// No rules at all. Hidden directories are still skipped by the scanner.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[SkipRule] {
        &self.rules
    }

    /// True when `path` falls under any denylisted location.
    pub fn is_denied(&self, path: &Path) -> bool {
        let components = lowercase_components(path);
        self.rules.iter().any(|r| r.matches_components(&components))
    }

    /// True when the walk must not enter the directory at `path`:
    /// its name starts with a dot or the path is denylisted.
    pub fn should_skip_dir(&self, path: &Path) -> bool {
        is_hidden(path) || self.is_denied(path)
    }
}

pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn lowercase_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_lowercase()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied(path: &str) -> bool {
        SkipRules::default().is_denied(Path::new(path))
    }

    #[test]
    fn default_rules_cover_every_fragment() {
        let rules = SkipRules::default();
        assert_eq!(rules.rules().len(), DEFAULT_FRAGMENTS.len());
        let xcode = rules
            .rules()
            .iter()
            .find(|r| r.segments().len() == 2 && r.segments()[0] == "applications")
            .unwrap();
        assert_eq!(xcode.segments()[1], "xcode.app");
    }

    #[test]
    fn empty_fragment_is_not_a_rule() {
        assert!(SkipRule::new("").is_none());
        assert!(SkipRule::new("///").is_none());
    }

    #[test]
    fn matches_system_locations_anywhere_in_path() {
        assert!(denied("/Library"));
        assert!(denied("/Users/me/Library"));
        assert!(denied("/Users/me/Library/Caches/foo"));
        assert!(denied("/System/Volumes/Data"));
        assert!(denied("/private/var"));
        assert!(denied("/usr/bin"));
        assert!(denied("/usr/libexec/x"));
        assert!(denied("/Applications/Xcode.app"));
        assert!(denied("/Applications/Xcode.app/Contents"));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(denied("/users/me/LIBRARY"));
        assert!(denied("/APPLICATIONS/XCODE.APP"));
    }

    #[test]
    fn last_segment_matches_as_prefix() {
        // same as a substring check anchored on a separator
        assert!(denied("/home/me/binaries"));
        assert!(denied("/home/me/devtools"));
        assert!(denied("/Applications/Xcode.app-beta"));
    }

    #[test]
    fn leaves_ordinary_paths_alone() {
        assert!(!denied("/home/me/docs"));
        assert!(!denied("/Users/me/Downloads/mylibrary"));
        assert!(!denied("/Applications/Safari.app"));
        assert!(!denied("/Applications/Tools/Xcode.app"));
        assert!(!denied("/home/me/usr/local"));
    }

    #[test]
    fn inner_segments_must_match_exactly() {
        let rules = SkipRules::from_fragments(&["/usr/bin"]);
        assert!(rules.is_denied(Path::new("/usr/bin")));
        assert!(rules.is_denied(Path::new("/opt/usr/binx")));
        assert!(!rules.is_denied(Path::new("/usrx/bin")));
        assert!(!rules.is_denied(Path::new("/usr")));
    }

    #[test]
    fn hidden_directories_are_skipped_without_rules() {
        let rules = SkipRules::empty();
        assert!(rules.should_skip_dir(Path::new("/home/me/.cache")));
        assert!(!rules.should_skip_dir(Path::new("/home/me/cache")));
        assert!(!rules.should_skip_dir(Path::new("/home/me/Library")));
    }
}
