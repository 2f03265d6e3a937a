//! Derive a note's graph name and group from its collection path.

const NOTE_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// Final path segment without its markdown extension (`notes/Idea.md` -> `Idea`).
#[must_use]
pub fn name_from_path(path: &str) -> String {
    let file = segments(path).last().unwrap_or_default();
    strip_note_extension(file).to_string()
}

/// Every segment but the last, `/`-joined; empty for a top-level note.
#[must_use]
pub fn group_from_path(path: &str) -> String {
    let segments: Vec<&str> = segments(path).collect();
    match segments.split_last() {
        Some((_, parents)) => parents.join("/"),
        None => String::new(),
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(|c: char| c == '/' || c == '\\').filter(|s| !s.is_empty())
}

fn strip_note_extension(file: &str) -> &str {
    for ext in NOTE_EXTENSIONS {
        if file.len() > ext.len() {
            let split = file.len() - ext.len();
            if file.is_char_boundary(split) && file[split..].eq_ignore_ascii_case(ext) {
                return &file[..split];
            }
        }
    }
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_markdown_extension() {
        assert_eq!(name_from_path("Inbox.md"), "Inbox");
        assert_eq!(name_from_path("projects/web/Launch Plan.MD"), "Launch Plan");
        assert_eq!(name_from_path("a/b.markdown"), "b");
        assert_eq!(name_from_path("a/readme.txt"), "readme.txt");
        assert_eq!(name_from_path(".md"), ".md");
    }

    #[test]
    fn group_is_parent_segments() {
        assert_eq!(group_from_path("Inbox.md"), "");
        assert_eq!(group_from_path("projects/web/Launch.md"), "projects/web");
        assert_eq!(group_from_path("/daily/2024-01-01.md"), "daily");
        assert_eq!(group_from_path(""), "");
    }

    #[test]
    fn windows_separators() {
        assert_eq!(name_from_path("areas\\health\\Sleep.md"), "Sleep");
        assert_eq!(group_from_path("areas\\health\\Sleep.md"), "areas/health");
    }
}
