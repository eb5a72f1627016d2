use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

const FALLBACK_STEM: &str = "untitled";

/// Turns a title into a filesystem-safe basename (no extension).
///
/// The title is NFKD-decomposed and reduced to ASCII, spaces become
/// underscores, and only `A-Z a-z 0-9 - _ . ( ) { }` survive. Accents
/// therefore degrade to their base letter (`Café` → `Cafe`).
pub fn sanitize_filename(title: &str) -> String {
    title
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || "-_.(){}".contains(*c))
        .collect()
}

/// [`sanitize_filename`], falling back to `untitled` for titles that leave
/// nothing usable (empty, or only dots).
pub fn file_stem(title: &str) -> String {
    let stem = sanitize_filename(title);
    if stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Hands out unique names inside one destination directory.
///
/// Names are compared case-insensitively so the result is also safe on
/// case-insensitive filesystems. A taken `name.ext` becomes `name_1.ext`,
/// `name_2.ext`, ...
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` as used without returning it (e.g. `index.md`).
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_lowercase());
    }

    pub fn claim(&mut self, stem: &str, ext: &str) -> String {
        let mut candidate = format!("{stem}{ext}");
        let mut i = 0;
        while self.taken.contains(&candidate.to_lowercase()) {
            i += 1;
            candidate = format!("{stem}_{i}{ext}");
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}
