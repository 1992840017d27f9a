//! URL slugs derived from product titles.

/// Lowercase the ASCII alphanumerics of `title` and join the runs between them
/// with single hyphens.
///
/// Non-ASCII characters act as separators, so a title made only of them yields
/// an empty slug.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for word in title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }

        slug.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }

    slug
}
