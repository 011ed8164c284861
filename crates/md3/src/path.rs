//! Locator resolution for model sources.

const SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// Returns true if `locator` carries one of the supported schemes.
#[must_use]
pub fn has_scheme(locator: &str) -> bool {
    SCHEMES.iter().any(|scheme| locator.starts_with(scheme))
}

/// Resolve `path` against the locator it is relative to.
///
/// Scheme-qualified paths are returned unchanged. A base without `://` is
/// treated as a plain directory path and `path` is appended to its parent
/// directory. Otherwise the base is split into protocol, domain and
/// directory segments, `path` is applied segment by segment (`..` pops,
/// `.` and empty segments are skipped, a leading `/` restarts at the domain
/// root) and the result is joined back as `protocol://domain/segments`.
#[must_use]
pub fn get_absolute_path(path: &str, relative_to: &str) -> String {
    if has_scheme(path) {
        return path.to_string();
    }

    let Some((protocol, rest)) = relative_to.split_once("://") else {
        return match relative_to.rfind('/') {
            Some(slash) => format!("{}/{path}", &relative_to[..slash]),
            None => path.to_string(),
        };
    };

    let mut bits = rest.split('/');
    let domain = bits.next().unwrap_or_default();
    let mut segments: Vec<&str> = bits.collect();
    // Drop the document name; only its directory matters.
    segments.pop();

    if path.starts_with('/') {
        segments.clear();
    }

    for segment in path.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "" | "." => {}
            other => segments.push(other),
        }
    }

    format!("{protocol}://{domain}/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_paths_pass_through() {
        for path in [
            "http://a/b.md3",
            "https://a/b.md3",
            "file:///models/b.md3",
        ] {
            assert_eq!(get_absolute_path(path, "http://host/dir/page.html"), path);
        }
    }

    #[test]
    fn relative_to_page() {
        assert_eq!(
            get_absolute_path("model.md3", "http://host/dir/page.html"),
            "http://host/dir/model.md3"
        );
    }

    #[test]
    fn parent_segments_pop() {
        assert_eq!(
            get_absolute_path("../models/./head.md3", "http://host/a/b/page.html"),
            "http://host/a/models/head.md3"
        );
        assert_eq!(
            get_absolute_path("../../../x.md3", "https://host/a/page.html"),
            "https://host/x.md3"
        );
    }

    #[test]
    fn rooted_path_restarts_at_domain() {
        assert_eq!(
            get_absolute_path("/assets/x.md3", "http://host:8080/a/b/page.html"),
            "http://host:8080/assets/x.md3"
        );
    }

    #[test]
    fn plain_base_uses_directory_prefix() {
        assert_eq!(
            get_absolute_path("lower.md3", "models/players/sarge/animation.cfg"),
            "models/players/sarge/lower.md3"
        );
        assert_eq!(get_absolute_path("lower.md3", "animation.cfg"), "lower.md3");
    }
}
