//! URL slugs for articles.
//!
//! Slugs are lowercase ASCII letters and digits separated by single hyphens.
//! Cyrillic titles are transliterated so Russian article titles still yield
//! readable slugs.

use crate::error::CoreError;

/// Maximum slug length (matches the `VARCHAR(200)` column).
pub const MAX_SLUG_LENGTH: usize = 200;

fn transliterate(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(s)
}

/// Derive a slug from free text. May return an empty string when the input
/// contains nothing usable.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let piece: Option<std::borrow::Cow<'static, str>> = if c.is_ascii_alphanumeric() {
            Some(c.to_string().into())
        } else {
            transliterate(c).map(Into::into)
        };

        match piece {
            Some(p) if !p.is_empty() => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push_str(&p);
            }
            // Hard and soft signs vanish without splitting the word.
            Some(_) => {}
            None => pending_hyphen = true,
        }
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Validate a client-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be 1 to {MAX_SLUG_LENGTH} characters"
        )));
    }
    let well_formed = slug
        .split('-')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    if !well_formed {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters and digits separated by single hyphens"
        )));
    }
    Ok(())
}

/// Use `explicit` when given (after validation), otherwise derive from `title`.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, CoreError> {
    if let Some(s) = explicit {
        validate_slug(s)?;
        return Ok(s.to_string());
    }
    let derived = slugify(title);
    if derived.is_empty() {
        return Err(CoreError::Validation(
            "Cannot derive a slug from the title; provide one explicitly".into(),
        ));
    }
    Ok(derived)
}
