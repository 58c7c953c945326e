use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block; stripped after NFKD decomposition so that accented letters
/// collapse onto their base letter.
fn is_combining_diacritic(c: char) -> bool { ('\u{0300}'..='\u{036f}').contains(&c) }

/// Converts a display name into the identifier used for preset file names and lookups.
///
/// Accents are removed, every run of characters outside `[A-Za-z0-9]` becomes a single `-`, and
/// the result is lowercased with no leading or trailing `-`.  An absent name is passed as `""` and
/// produces an empty slug.
pub fn slugify(input: &str) -> String {
  let mut slug = String::with_capacity(input.len());
  let mut pending_separator = false;

  for c in input.nfkd().filter(|&c| !is_combining_diacritic(c)) {
    if !c.is_ascii_alphanumeric() {
      pending_separator = true;
      continue;
    }

    if pending_separator && !slug.is_empty() {
      slug.push('-');
    }
    pending_separator = false;
    slug.push(c.to_ascii_lowercase());
  }

  slug
}
