/// Turn a title into a URL slug.
///
/// Runs of spaces collapse to a single hyphen and the result is lowercased.
/// Leading and trailing spaces become hyphens too. Accented and other
/// non-ASCII characters are kept as they are.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut previous_space = false;
    for c in title.chars() {
        if c == ' ' {
            if !previous_space {
                slug.push('-');
            }
            previous_space = true;
        } else {
            slug.push(c);
            previous_space = false;
        }
    }
    slug.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(slugify("A   B"), "a-b");
        assert_eq!(slugify("one  two     three"), "one-two-three");
    }

    #[test]
    fn test_idempotent() {
        for title in ["My First Post", "  padded  title ", " Hello  World ", "already-a-slug", "Ünïcode Títle"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "slugify should be idempotent for {title:?}");
        }
    }

    #[test]
    fn test_non_ascii_is_kept() {
        assert_eq!(slugify("Café Olé"), "café-olé");
    }

    #[test]
    fn test_edge_spaces_become_hyphens() {
        assert_eq!(slugify(" Hello  World "), "-hello-world-");
        assert_eq!(slugify("  Trailing"), "-trailing");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "-");
    }
}
