//! Fix substitution templates.
//!
//! A rule's `fix` is a template expanded against each regex match.
//!
//! # Syntax
//!
//! - `$1` .. `$99` - numbered capture group (two digits only when that
//!   group exists, so `$10` reads as group 1 followed by `0` in a pattern
//!   with fewer than ten groups)
//! - `$0`, `$&` - the whole match
//! - `${name}`, `$<name>`, `${1}` - named or numbered group
//! - `$$` - a literal `$`
//!
//! Groups that do not exist or did not participate in the match expand to
//! empty text. A `$` followed by anything else is kept literally.

use regex::Captures;

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Numbered group reference; `0` is the whole match
    Group(usize),
    /// Named group reference
    Named(String),
}

/// A parsed substitution template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` for a pattern with `group_count` groups (including
    /// group 0, as reported by `Regex::captures_len`).
    pub fn parse(source: &str, group_count: usize) -> Self {
        Self {
            source: source.to_string(),
            segments: parse_segments(source, group_count),
        }
    }

    /// The template that reproduces the whole match unchanged.
    pub fn identity() -> Self {
        Self {
            source: "$&".to_string(),
            segments: vec![Segment::Group(0)],
        }
    }

    /// Original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether expansion always yields the whole match.
    pub fn is_identity(&self) -> bool {
        self.segments == [Segment::Group(0)]
    }

    /// Expand the template against one match.
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Group(index) => {
                    if let Some(m) = caps.get(*index) {
                        out.push_str(m.as_str());
                    }
                }
                Segment::Named(name) => {
                    if let Some(m) = caps.name(name) {
                        out.push_str(m.as_str());
                    }
                }
            }
        }
        out
    }
}

fn parse_segments(input: &str, group_count: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                literal.push('$');
            }
            Some('&') => {
                chars.next();
                flush(&mut literal, &mut segments);
                segments.push(Segment::Group(0));
            }
            Some(d) if d.is_ascii_digit() => {
                chars.next();
                let first = d.to_digit(10).unwrap_or(0) as usize;
                let mut index = first;
                if let Some(second) = chars.peek().and_then(|c| c.to_digit(10)) {
                    let two = first * 10 + second as usize;
                    if two < group_count {
                        chars.next();
                        index = two;
                    }
                }
                flush(&mut literal, &mut segments);
                segments.push(Segment::Group(index));
            }
            Some(open @ ('{' | '<')) => {
                let close = if open == '{' { '}' } else { '>' };
                let rest: String = chars.clone().skip(1).collect();
                match rest.find(close) {
                    Some(end) if end > 0 => {
                        let name = &rest[..end];
                        // consume the opening bracket, the name, and the closing bracket
                        for _ in 0..name.chars().count() + 2 {
                            chars.next();
                        }
                        flush(&mut literal, &mut segments);
                        match name.parse::<usize>() {
                            Ok(index) => segments.push(Segment::Group(index)),
                            Err(_) => segments.push(Segment::Named(name.to_string())),
                        }
                    }
                    _ => literal.push('$'),
                }
            }
            _ => literal.push('$'),
        }
    }

    flush(&mut literal, &mut segments);
    segments
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn expand(pattern: &str, template: &str, haystack: &str) -> String {
        let regex = Regex::new(pattern).unwrap();
        let caps = regex.captures(haystack).unwrap();
        Template::parse(template, regex.captures_len()).expand(&caps)
    }

    #[test]
    fn parses_literals_and_groups() {
        let template = Template::parse("assert $1: $2", 3);
        assert_eq!(
            template.segments,
            [
                Segment::Literal("assert ".into()),
                Segment::Group(1),
                Segment::Literal(": ".into()),
                Segment::Group(2),
            ]
        );
    }

    #[test]
    fn expands_numbered_groups() {
        let out = expand(r"assert\((.+), (.+)\)", "assert $1: $2", r#"assert(false, "x")"#);
        assert_eq!(out, r#"assert false: "x""#);
    }

    #[test]
    fn group_followed_by_text_is_not_a_name() {
        assert_eq!(expand(r"(\w+)", "$1_suffix", "name"), "name_suffix");
    }

    #[test]
    fn two_digit_group_only_when_it_exists() {
        assert_eq!(expand(r"(a)", "$10", "a"), "a0");
    }

    #[test]
    fn whole_match_references() {
        assert_eq!(expand(r"b+", "[$&]", "abbc"), "[bb]");
        assert_eq!(expand(r"b+", "[$0]", "abbc"), "[bb]");
    }

    #[test]
    fn named_groups_in_both_syntaxes() {
        assert_eq!(expand(r"(?P<word>\w+)", "${word}!", "hi"), "hi!");
        assert_eq!(expand(r"(?P<word>\w+)", "$<word>?", "hi"), "hi?");
        assert_eq!(expand(r"(\w+)", "${1}x", "hi"), "hix");
    }

    #[test]
    fn escaped_dollar_is_literal() {
        assert_eq!(expand(r"\d+", "$$$&", "cost 42"), "$42");
    }

    #[test]
    fn missing_groups_expand_to_empty() {
        assert_eq!(expand(r"(a)|(b)", "<$2>", "a"), "<>");
        assert_eq!(expand(r"a", "<$7>", "a"), "<>");
        assert_eq!(expand(r"a", "<${nope}>", "a"), "<>");
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(expand(r"a", "$ and ${", "a"), "$ and ${");
    }

    #[test]
    fn identity_template() {
        let template = Template::identity();
        assert!(template.is_identity());
        assert!(Template::parse("$0", 1).is_identity());
        assert!(!Template::parse("$1", 2).is_identity());
    }
}
