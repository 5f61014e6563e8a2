use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator written between the semantic type and the counter. Two
/// generations of trees exist (`slug-typ_001.txt` and `slug-typ-001.txt`);
/// parsing accepts both, generation follows the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    #[default]
    Underscore,
    Dash,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Self::Underscore => '_',
            Self::Dash => '-',
        }
    }
}

/// The eight fixed subfolders of every project, plus the sub-type refinement
/// for the finished-masters folder. Directory names are the Polish ones the
/// pre-existing tree was built with and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FolderType {
    /// FL Studio project files
    Fl,
    /// Reaper project files
    Reaper,
    /// Lyrics
    Tekst,
    /// Beat demos
    DemoBit,
    /// Vocal demos
    DemoNawijka,
    /// Full-song demos
    DemoUtwor,
    /// Finished masters
    Gotowe,
    /// Everything else
    Pliki,
}

pub const ALL_FOLDERS: [FolderType; 8] = [
    FolderType::Fl,
    FolderType::Reaper,
    FolderType::Tekst,
    FolderType::DemoBit,
    FolderType::DemoNawijka,
    FolderType::DemoUtwor,
    FolderType::Gotowe,
    FolderType::Pliki,
];

impl FolderType {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Fl => "Projekt FL",
            Self::Reaper => "Projekt Reaper",
            Self::Tekst => "Tekst",
            Self::DemoBit => "Demo bit",
            Self::DemoNawijka => "Demo nawijka",
            Self::DemoUtwor => "Demo utwor",
            Self::Gotowe => "Gotowe",
            Self::Pliki => "Pliki",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        ALL_FOLDERS.iter().copied().find(|f| f.dir_name() == name)
    }

    /// Semantic type tag written into generated filenames. The table is
    /// load-bearing for backward compatibility with the existing tree.
    /// `distinct_daw_types` switches the two DAW folders from the shared
    /// `projekt` tag to `projekt_bit`/`projekt_nawijka`.
    pub fn semantic_type(self, subtype: Option<Subtype>, distinct_daw_types: bool) -> String {
        match self {
            Self::Fl if distinct_daw_types => "projekt_bit".to_string(),
            Self::Reaper if distinct_daw_types => "projekt_nawijka".to_string(),
            Self::Fl | Self::Reaper => "projekt".to_string(),
            Self::Tekst => "tekst".to_string(),
            Self::DemoBit => "bit_demo".to_string(),
            Self::DemoNawijka => "nawijka_demo".to_string(),
            Self::DemoUtwor => "utwor_demo".to_string(),
            Self::Gotowe => match subtype {
                Some(sub) => format!("{}_gotowy", sub.as_str()),
                None => "gotowy".to_string(),
            },
            Self::Pliki => "plik".to_string(),
        }
    }
}

impl fmt::Display for FolderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Refinement for files landing in the finished-masters folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Subtype {
    Bit,
    Nawijka,
    Utwor,
}

impl Subtype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bit => "bit",
            Self::Nawijka => "nawijka",
            Self::Utwor => "utwor",
        }
    }
}

/// Map the source locale's diacritics to their ASCII base letters. A fixed
/// table, not a general Unicode normalizer: only these characters ever occur
/// in the tree's project names.
fn transliterate(ch: char) -> char {
    match ch {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ó' => 'o',
        'ś' => 's',
        'ź' => 'z',
        'ż' => 'z',
        'Ą' => 'A',
        'Ć' => 'C',
        'Ę' => 'E',
        'Ł' => 'L',
        'Ń' => 'N',
        'Ó' => 'O',
        'Ś' => 'S',
        'Ź' => 'Z',
        'Ż' => 'Z',
        other => other,
    }
}

/// Lowercased snake_case slug of a project name: diacritics flattened,
/// whitespace runs collapsed to one underscore, everything outside
/// `[a-z0-9_]` dropped.
pub fn normalize_project_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for ch in name.chars().map(transliterate) {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        for lower in ch.to_lowercase() {
            if lower.is_ascii_lowercase() || lower.is_ascii_digit() || lower == '_' {
                if pending_space {
                    out.push('_');
                    pending_space = false;
                }
                out.push(lower);
            }
        }
    }
    out
}

/// Counter captured from `{prefix}[-_]{digits}{ext}`, or None when the name
/// does not follow the convention for this prefix/extension pair. Counters
/// beyond 999 are legal, so the digit run is unbounded.
fn parse_counter(file_name: &str, prefix: &str, extension: &str) -> Option<u64> {
    let rest = file_name.strip_prefix(prefix)?;
    let rest = rest.strip_suffix(extension)?;
    let digits = rest.strip_prefix(['-', '_'])?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Next collision-free conventional filename for a file entering a project
/// subfolder. Pure function of its inputs: the caller supplies the existing
/// sibling names already filtered to `extension`, and the highest counter
/// among convention matches determines the next one (max+1, baseline 0).
pub fn generate_file_name(
    project_name: &str,
    semantic_type: &str,
    extension: &str,
    existing_files: &[String],
    separator: Separator,
) -> String {
    let normalized = normalize_project_name(project_name);
    let prefix = format!("{normalized}-{semantic_type}");

    let max_counter = existing_files
        .iter()
        .filter_map(|name| parse_counter(name, &prefix, extension))
        .max()
        .unwrap_or(0);

    format!(
        "{prefix}{}{:03}{extension}",
        separator.as_char(),
        max_counter + 1
    )
}

/// Strict convention check the arranger filters by:
/// `^[a-z0-9_]+-[a-z0-9_]+[-_]\d{3}\.` (case-insensitive). Files that fail
/// this are custom-named and must never be touched.
pub fn is_conventional_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    let Some(dot) = lower.find('.') else {
        return false;
    };
    let stem = &lower[..dot];

    let is_word = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');

    // Counter: exactly three digits after the last separator.
    let Some(sep_idx) = stem.rfind(['-', '_']) else {
        return false;
    };
    let counter = &stem[sep_idx + 1..];
    if counter.len() != 3 || !counter.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    // Before it: slug-typ, split at the first dash.
    let head = &stem[..sep_idx];
    let Some((slug, typ)) = head.split_once('-') else {
        return false;
    };
    is_word(slug) && is_word(typ)
}

/// Rewrite a conventional name to use `separator` before its counter.
/// Returns None for non-conventional names or when nothing changes.
pub fn with_separator(file_name: &str, separator: Separator) -> Option<String> {
    if !is_conventional_name(file_name) {
        return None;
    }
    let dot = file_name.find('.')?;
    let sep_idx = file_name[..dot].rfind(['-', '_'])?;
    if file_name[sep_idx..].starts_with(separator.as_char()) {
        return None;
    }
    let mut out = String::with_capacity(file_name.len());
    out.push_str(&file_name[..sep_idx]);
    out.push(separator.as_char());
    out.push_str(&file_name[sep_idx + 1..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_flattens_diacritics_and_whitespace() {
        assert_eq!(normalize_project_name("Moja Piosenka"), "moja_piosenka");
        assert_eq!(normalize_project_name("Żółć  i Łzy"), "zolc_i_lzy");
        assert_eq!(normalize_project_name("Track #7 (final!)"), "track_7_final");
        assert_eq!(normalize_project_name("  spaced  "), "spaced");
    }

    #[test]
    fn first_file_gets_counter_001() {
        let got = generate_file_name("Moja Piosenka", "tekst", ".txt", &[], Separator::Underscore);
        assert_eq!(got, "moja_piosenka-tekst_001.txt");
    }

    #[test]
    fn counter_is_max_plus_one_not_count_plus_one() {
        let existing = vec![
            "x-tekst_001.txt".to_string(),
            "x-tekst_003.txt".to_string(),
        ];
        let got = generate_file_name("x", "tekst", ".txt", &existing, Separator::Underscore);
        assert_eq!(got, "x-tekst_004.txt");
    }

    #[test]
    fn both_separators_are_parsed() {
        let existing = vec!["x-tekst-005.txt".to_string(), "x-tekst_002.txt".to_string()];
        let got = generate_file_name("x", "tekst", ".txt", &existing, Separator::Dash);
        assert_eq!(got, "x-tekst-006.txt");
    }

    #[test]
    fn other_extensions_do_not_affect_the_counter() {
        let existing = vec!["x-tekst_001.txt".to_string()];
        let got = generate_file_name("x", "projekt", ".flp", &existing, Separator::Underscore);
        assert_eq!(got, "x-projekt_001.flp");
    }

    #[test]
    fn counters_grow_past_three_digits() {
        let existing = vec!["x-tekst_999.txt".to_string()];
        let got = generate_file_name("x", "tekst", ".txt", &existing, Separator::Underscore);
        assert_eq!(got, "x-tekst_1000.txt");

        let existing = vec!["x-tekst_1000.txt".to_string()];
        let got = generate_file_name("x", "tekst", ".txt", &existing, Separator::Underscore);
        assert_eq!(got, "x-tekst_1001.txt");
    }

    #[test]
    fn generation_is_deterministic() {
        let existing = vec!["a_b-plik_007.zip".to_string()];
        let first = generate_file_name("A B", "plik", ".zip", &existing, Separator::Underscore);
        let second = generate_file_name("A B", "plik", ".zip", &existing, Separator::Underscore);
        assert_eq!(first, second);
        assert_eq!(first, "a_b-plik_008.zip");
    }

    #[test]
    fn semantic_type_table_matches_the_tree() {
        assert_eq!(FolderType::Fl.semantic_type(None, false), "projekt");
        assert_eq!(FolderType::Reaper.semantic_type(None, false), "projekt");
        assert_eq!(FolderType::Fl.semantic_type(None, true), "projekt_bit");
        assert_eq!(FolderType::Reaper.semantic_type(None, true), "projekt_nawijka");
        assert_eq!(FolderType::Tekst.semantic_type(None, false), "tekst");
        assert_eq!(FolderType::DemoBit.semantic_type(None, false), "bit_demo");
        assert_eq!(FolderType::DemoNawijka.semantic_type(None, false), "nawijka_demo");
        assert_eq!(FolderType::DemoUtwor.semantic_type(None, false), "utwor_demo");
        assert_eq!(FolderType::Gotowe.semantic_type(None, false), "gotowy");
        assert_eq!(
            FolderType::Gotowe.semantic_type(Some(Subtype::Bit), false),
            "bit_gotowy"
        );
        assert_eq!(
            FolderType::Gotowe.semantic_type(Some(Subtype::Utwor), false),
            "utwor_gotowy"
        );
        assert_eq!(FolderType::Pliki.semantic_type(None, false), "plik");
    }

    #[test]
    fn convention_filter_accepts_both_separators() {
        assert!(is_conventional_name("moja-tekst-001.txt"));
        assert!(is_conventional_name("moja_piosenka-tekst_001.txt"));
        assert!(is_conventional_name("A-TEKST-001.TXT"));
    }

    #[test]
    fn separator_rewrite_only_touches_the_counter_separator() {
        assert_eq!(
            with_separator("moja-tekst-001.txt", Separator::Underscore).as_deref(),
            Some("moja-tekst_001.txt")
        );
        assert_eq!(
            with_separator("moja_piosenka-tekst_001.txt", Separator::Dash).as_deref(),
            Some("moja_piosenka-tekst-001.txt")
        );
        assert_eq!(with_separator("moja-tekst_001.txt", Separator::Underscore), None);
        assert_eq!(with_separator("random_name.txt", Separator::Dash), None);
    }

    #[test]
    fn convention_filter_rejects_custom_names() {
        assert!(!is_conventional_name("random_name.txt"));
        assert!(!is_conventional_name("moja-tekst-01.txt"));
        assert!(!is_conventional_name("moja-tekst-0001.txt"));
        assert!(!is_conventional_name("moja-tekst-001"));
        assert!(!is_conventional_name("-tekst-001.txt"));
    }
}
