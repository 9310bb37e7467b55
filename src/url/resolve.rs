/// Resolves the site's relative link conventions into absolute URLs
///
/// Listing pages link to detail pages with a mix of `../../../`-, `../../`-
/// and `../`-prefixed paths depending on how deep the listing sits, while
/// next-page links are plain same-directory file names and image sources use
/// the double-parent convention against the site base. Each convention gets
/// its own deterministic, side-effect-free resolution rule; a generic
/// RFC 3986 join would collapse them all the same way and produce URLs the
/// server does not serve.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base_url: String,
    catalogue_root: String,
}

impl UrlResolver {
    /// Creates a resolver from the site base URL and the catalogue root
    ///
    /// Both are normalized to carry a trailing slash so concatenation never
    /// produces a missing or doubled separator.
    pub fn new(base_url: &str, catalogue_root: &str) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            catalogue_root: with_trailing_slash(catalogue_root),
        }
    }

    /// Resolves an item link found on a listing page to an absolute URL
    ///
    /// Rules, in order of prefix specificity (longest match wins):
    /// 1. already absolute (`http`/`https` scheme) → returned unchanged
    /// 2. `../../../` → stripped, prepend the catalogue root
    /// 3. `../../` → stripped, prepend the base URL
    /// 4. `../` → strip all leading instances, prepend the catalogue root
    /// 5. bare → prepend the catalogue root
    pub fn resolve_item(&self, link: &str) -> String {
        let link = link.trim();

        if is_absolute(link) {
            return link.to_string();
        }
        if let Some(rest) = link.strip_prefix("../../../") {
            return format!("{}{}", self.catalogue_root, rest);
        }
        if let Some(rest) = link.strip_prefix("../../") {
            return format!("{}{}", self.base_url, rest);
        }
        if link.starts_with("../") {
            return format!("{}{}", self.catalogue_root, strip_parent_markers(link));
        }
        format!("{}{}", self.catalogue_root, link)
    }

    /// Resolves a next-page link relative to the current listing page
    ///
    /// Next-page hrefs are plain file names in the same directory as the
    /// page that carries them (`page-2.html` next to `index.html`), so the
    /// last path segment of the current URL is replaced wholesale. The
    /// parent-marker rules above do not apply here.
    pub fn resolve_next_page(&self, current_page_url: &str, href: &str) -> String {
        let href = href.trim();

        if is_absolute(href) {
            return href.to_string();
        }
        match current_page_url.rsplit_once('/') {
            Some((dir, _)) => format!("{}/{}", dir, href),
            None => format!("{}{}", self.catalogue_root, href),
        }
    }

    /// Resolves an image source to an absolute URL
    ///
    /// Detail pages reference media with the double-parent convention
    /// against the site base; any leading parent markers are stripped and
    /// the remainder appended to the base URL.
    pub fn resolve_image(&self, src: &str) -> String {
        let src = src.trim();

        if is_absolute(src) {
            return src.to_string();
        }
        format!("{}{}", self.base_url, strip_parent_markers(src))
    }
}

fn is_absolute(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

fn strip_parent_markers(link: &str) -> &str {
    let mut rest = link;
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped;
    }
    rest
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
