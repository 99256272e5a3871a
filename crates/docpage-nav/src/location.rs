//! Browser location.

/// Path and fragment of the current page URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, e.g. `/doc/command-reference/remove`.
    pub pathname: String,
    /// Fragment without the leading `#`, e.g. `options`.
    pub hash: Option<String>,
}

impl Location {
    /// Create a location from a path without fragment.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            hash: None,
        }
    }

    /// Parse a URL or URL path.
    ///
    /// Accepts absolute URLs (`https://host/doc/x#y`) and paths
    /// (`/doc/x#y`). The query string is dropped; an empty fragment is
    /// treated as absent.
    pub fn parse(url: &str) -> Self {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash)),
            None => (url, None),
        };
        let rest = rest.split_once('?').map_or(rest, |(path, _)| path);

        let pathname = match rest.split_once("://") {
            Some((_, after_scheme)) => after_scheme
                .find('/')
                .map_or("/", |idx| &after_scheme[idx..]),
            None => rest,
        };

        Self {
            pathname: pathname.to_owned(),
            hash: hash.filter(|h| !h.is_empty()).map(str::to_owned),
        }
    }

    /// Non-empty path segment at `index` (segment 0 is before the first `/`).
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.pathname.split('/').nth(index).filter(|s| !s.is_empty())
    }

    /// Full URL path including the fragment.
    pub fn href(&self) -> String {
        match &self.hash {
            Some(hash) => format!("{}#{hash}", self.pathname),
            None => self.pathname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_path() {
        let loc = Location::parse("/doc/commands/add");
        assert_eq!(loc.pathname, "/doc/commands/add");
        assert_eq!(loc.hash, None);
    }

    #[test]
    fn test_parse_fragment() {
        let loc = Location::parse("/doc/commands/add#options");
        assert_eq!(loc.pathname, "/doc/commands/add");
        assert_eq!(loc.hash.as_deref(), Some("options"));
    }

    #[test]
    fn test_parse_empty_fragment() {
        assert_eq!(Location::parse("/doc#").hash, None);
    }

    #[test]
    fn test_parse_absolute_url_with_query() {
        let loc = Location::parse("https://example.com/doc/get-started?ref=nav#install");
        assert_eq!(loc.pathname, "/doc/get-started");
        assert_eq!(loc.hash.as_deref(), Some("install"));
    }

    #[test]
    fn test_parse_absolute_url_without_path() {
        assert_eq!(Location::parse("https://example.com").pathname, "/");
    }

    #[test]
    fn test_segments() {
        let loc = Location::new("/doc/commands/add");
        assert_eq!(loc.segment(1), Some("doc"));
        assert_eq!(loc.segment(2), Some("commands"));
        assert_eq!(loc.segment(3), Some("add"));
        assert_eq!(loc.segment(4), None);
    }

    #[test]
    fn test_trailing_slash_segment_is_absent() {
        let loc = Location::new("/doc/commands/");
        assert_eq!(loc.segment(2), Some("commands"));
        assert_eq!(loc.segment(3), None);
    }

    #[test]
    fn test_href_round_trip() {
        assert_eq!(Location::parse("/doc/a#b").href(), "/doc/a#b");
        assert_eq!(Location::new("/doc/a").href(), "/doc/a");
    }
}
