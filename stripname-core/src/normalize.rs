//! Pure filename transforms used for prefix inference and cosmetic cleanup.
//!
//! Nothing in here touches the filesystem.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Words left lowercase by [`title_case_words`] (unless "the" opens the name)
pub const STOP_WORDS: &[&str] = &[
    "and", "the", "of", "or", "a", "an", "in", "to", "for", "with", "on", "at", "by", "but", "nor",
    "from", "bpm",
];

static SEPARATOR_RUN: OnceLock<Regex> = OnceLock::new();
static BPM_TOKEN: OnceLock<Regex> = OnceLock::new();

fn separator_run() -> &'static Regex {
    SEPARATOR_RUN.get_or_init(|| Regex::new(r"[ \-_]+").expect("separator pattern is valid"))
}

fn bpm_token() -> &'static Regex {
    BPM_TOKEN.get_or_init(|| Regex::new(r"(?i)bpm").expect("bpm pattern is valid"))
}

/// Optional cosmetic passes run on a smart-mode result, in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// Rewrite every `bpm` (any case) as `BPM`
    #[serde(default)]
    pub capitalize_bpm: bool,
    /// Capitalize each underscore-delimited word outside [`STOP_WORDS`]
    #[serde(default)]
    pub title_case_words: bool,
    /// Turn every underscore into a space
    #[serde(default)]
    pub underscores_to_spaces: bool,
}

impl Cosmetics {
    pub fn any(&self) -> bool {
        self.capitalize_bpm || self.title_case_words || self.underscores_to_spaces
    }
}

/// Split a filename into `(stem, extension)` where the extension keeps its dot.
///
/// Leading dots never start an extension, so `.bashrc` has no extension and
/// `..hidden.txt` splits as `("..hidden", ".txt")`.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let leading = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading..].rfind('.') {
        Some(idx) => filename.split_at(leading + idx),
        None => (filename, ""),
    }
}

/// Lowercase the stem of `filename` and collapse every run of spaces,
/// hyphens and underscores into one underscore. The extension is dropped.
pub fn normalize_stem(filename: &str) -> String {
    let (stem, _) = split_extension(filename);
    separator_run()
        .replace_all(&stem.to_lowercase(), "_")
        .into_owned()
}

/// The smart-mode working name: normalized stem plus the untouched extension.
pub fn normalized_name(filename: &str) -> String {
    let (_, extension) = split_extension(filename);
    let mut name = normalize_stem(filename);
    name.push_str(extension);
    name
}

/// Longest string that prefixes every input, compared char by char.
pub fn common_prefix<S: AsRef<str>>(strings: &[S]) -> String {
    let Some((first, rest)) = strings.split_first() else {
        return String::new();
    };

    let first = first.as_ref();
    let mut end = first.len();
    for other in rest {
        let shared: usize = first
            .chars()
            .zip(other.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        end = end.min(shared);
        if end == 0 {
            break;
        }
    }

    first[..end].to_string()
}

/// Regex source matching `text` literally, except that each underscore also
/// accepts a space or a hyphen. Hyphens are emitted bare.
pub fn escape_for_match(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() * 2);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        match ch {
            '_' => pattern.push_str("[ _-]"),
            '-' => pattern.push('-'),
            _ => pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
        }
    }
    pattern
}

/// Python-style capitalize: first char uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Capitalize every underscore-delimited word that is not a stop word. A
/// leading "the" is always capitalized.
pub fn title_case_words(name: &str) -> String {
    let mut words: Vec<String> = name.split('_').map(str::to_string).collect();

    if let Some(first) = words.first_mut() {
        if first.to_lowercase() == "the" {
            *first = capitalize(first);
        }
    }

    for word in &mut words {
        if !STOP_WORDS.contains(&word.to_lowercase().as_str()) {
            *word = capitalize(word);
        }
    }

    words.join("_")
}

/// Run the enabled cosmetic passes over `name`.
///
/// Order is fixed: BPM first, then title casing (which splits on
/// underscores), then underscores to spaces.
pub fn apply_cosmetics(name: &str, cosmetics: &Cosmetics) -> String {
    let mut result = name.to_string();

    if cosmetics.capitalize_bpm {
        result = bpm_token().replace_all(&result, "BPM").into_owned();
    }
    if cosmetics.title_case_words {
        result = title_case_words(&result);
    }
    if cosmetics.underscores_to_spaces {
        result = result.replace('_', " ");
    }

    result
}
