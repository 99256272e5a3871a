//! Slug and label derivation.
//!
//! Every URL segment and anchor on a documentation page comes from
//! [`slugify`], so links generated for the sidebar always resolve back to
//! the entry they were generated from.

/// Markdown extension stripped from filenames before slugging.
const MARKDOWN_EXT: &str = ".md";

/// Convert text to a kebab-case slug.
///
/// Apostrophes are dropped, the text is split into words and the words are
/// lowercased and joined with `-`.
///
/// # Examples
///
/// ```
/// use docpage_nav::slugify;
///
/// assert_eq!(slugify("Get Started"), "get-started");
/// assert_eq!(slugify("fooBar"), "foo-bar");
/// assert_eq!(slugify("HTTPServer"), "http-server");
/// ```
pub fn slugify(text: &str) -> String {
    words(text)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert text to start case: words separated by a space, each starting
/// with an uppercase letter.
///
/// # Examples
///
/// ```
/// use docpage_nav::start_case;
///
/// assert_eq!(start_case("get-started"), "Get Started");
/// assert_eq!(start_case("fooBar"), "Foo Bar");
/// ```
pub fn start_case(text: &str) -> String {
    words(text)
        .iter()
        .map(|w| upper_first(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filename without its trailing `.md` extension.
pub fn file_stem(file: &str) -> &str {
    file.strip_suffix(MARKDOWN_EXT).unwrap_or(file)
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Split text into words.
///
/// Runs of alphanumeric characters are further split at case changes
/// (`fooBar`, `HTTPServer`) and at letter/digit boundaries (`v2beta`).
fn words(text: &str) -> Vec<String> {
    let cleaned: String = text.chars().filter(|c| !is_apostrophe(*c)).collect();
    let mut words = Vec::new();
    for run in cleaned.split(|c: char| !c.is_alphanumeric()) {
        if !run.is_empty() {
            split_run(run, &mut words);
        }
    }
    words
}

fn split_run(run: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = run.chars().collect();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && is_boundary(chars[i - 1], c, chars.get(i + 1).copied()) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
}

fn is_boundary(prev: char, cur: char, next: Option<char>) -> bool {
    if prev.is_numeric() != cur.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && cur.is_uppercase() {
        return true;
    }
    // "HTTPServer": split before the last capital of an acronym.
    prev.is_uppercase() && cur.is_uppercase() && next.is_some_and(char::is_lowercase)
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
