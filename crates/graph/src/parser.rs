//! Reference and tag extraction from raw note text.
//!
//! Extraction is pattern based and never fails: malformed frontmatter or unmatched
//! brackets simply contribute nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

static INLINE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#([A-Za-z][A-Za-z0-9_/-]*)").unwrap());

static FRONTMATTER_TAG_LIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^tags:[ \t]*\[([^\]\n]*)\]").unwrap());

static FRONTMATTER_TAG_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^tags:[ \t]*\r?\n((?:[ \t]*-[^\n]*(?:\n|\z))+)").unwrap());

/// Extract `[[Target]]` references in order of appearance.
///
/// Display text (`[[Target|Shown]]`) and section anchors (`[[Target#Heading]]`) are
/// dropped; only the trimmed target survives. Duplicates are kept, empty targets are not.
#[must_use]
pub fn parse_references(text: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            let end = inner.find(|c: char| c == '|' || c == '#').unwrap_or(inner.len());
            let target = inner[..end].trim();
            (!target.is_empty()).then(|| target.to_string())
        })
        .collect()
}

/// Collect tags from the frontmatter `tags:` key and from inline `#tags` in the body.
#[must_use]
pub fn parse_tags(text: &str) -> BTreeSet<String> {
    let (frontmatter, body) = split_frontmatter(text);

    let mut tags = BTreeSet::new();
    if let Some(frontmatter) = frontmatter {
        tags.extend(frontmatter_tags(frontmatter));
    }
    tags.extend(
        INLINE_TAG_RE
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    );
    tags
}

/// Split off a leading `---` block. Without a closing `---` line the whole text is body.
fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, text);
    };
    if first.trim_end() != "---" {
        return (None, text);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return (Some(&text[start..offset]), &text[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, text)
}

fn frontmatter_tags(frontmatter: &str) -> Vec<String> {
    let mut tags = Vec::new();

    for caps in FRONTMATTER_TAG_LIST_RE.captures_iter(frontmatter) {
        if let Some(list) = caps.get(1) {
            tags.extend(list.as_str().split(',').filter_map(clean_tag));
        }
    }

    for caps in FRONTMATTER_TAG_BLOCK_RE.captures_iter(frontmatter) {
        if let Some(block) = caps.get(1) {
            tags.extend(
                block
                    .as_str()
                    .lines()
                    .filter_map(|line| line.trim_start().strip_prefix('-'))
                    .filter_map(clean_tag),
            );
        }
    }

    tags
}

fn clean_tag(raw: &str) -> Option<String> {
    let tag = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .trim_start_matches('#')
        .trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn references_keep_target_only() {
        let text = "See [[Alpha]], [[ Beta | the beta ]] and [[Gamma#Usage]] then [[Alpha]].";
        assert_eq!(parse_references(text), vec!["Alpha", "Beta", "Gamma", "Alpha"]);
    }

    #[test]
    fn references_do_not_span_closing_brackets() {
        let text = "[[One]] text ]] [[Two]] [[broken [[Three]]";
        assert_eq!(parse_references(text), vec!["One", "Two", "broken [[Three"]);
    }

    #[test]
    fn references_skip_empty_targets() {
        assert!(parse_references("[[#Heading]] [[ |alias]] [[]]").is_empty());
    }

    #[test]
    fn inline_frontmatter_list() {
        let text = "---\ntitle: x\ntags: [alpha, \"beta\", '#gamma', , ]\n---\nbody";
        assert_eq!(parse_tags(text), tags(&["alpha", "beta", "gamma"]));
    }

    #[test]
    fn block_frontmatter_list() {
        let text = "---\ntags:\n  - project\n  - \"#area/home\"\n  -\nstatus: done\n---\n";
        assert_eq!(parse_tags(text), tags(&["area/home", "project"]));
    }

    #[test]
    fn inline_body_tags() {
        let text = "#start mid#not #x-1 #2bad\n#nested/tag_1 # heading";
        assert_eq!(parse_tags(text), tags(&["nested/tag_1", "start", "x-1"]));
    }

    #[test]
    fn frontmatter_is_excluded_from_inline_scan() {
        let text = "---\nnote: #hidden\ntags: [shown]\n---\nbody #visible";
        assert_eq!(parse_tags(text), tags(&["shown", "visible"]));
    }

    #[test]
    fn unterminated_frontmatter_is_body() {
        let text = "---\ntags: [never]\n#inline";
        assert_eq!(parse_tags(text), tags(&["inline"]));
    }

    #[test]
    fn crlf_frontmatter() {
        let text = "---\r\ntags: [a, b]\r\n---\r\n#c";
        assert_eq!(parse_tags(text), tags(&["a", "b", "c"]));
    }

    #[test]
    fn empty_text_has_nothing() {
        assert!(parse_tags("").is_empty());
        assert!(parse_references("").is_empty());
    }
}
