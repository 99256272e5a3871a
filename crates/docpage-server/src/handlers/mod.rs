//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod pages;
pub(crate) mod sidebar;

use docpage_nav::DOC_ROOT;

/// Page URL for a wildcard path captured under the documentation root.
///
/// Axum captures `{*path}` without its leading slash, so `command-reference/add`
/// becomes `/doc/command-reference/add` and the empty path becomes `/doc`.
pub(crate) fn to_page_url(path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        DOC_ROOT.to_owned()
    } else {
        format!("{DOC_ROOT}/{path}")
    }
}
