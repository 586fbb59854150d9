use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Convert a markdown answer into styled ratatui lines.
///
/// Covers the constructs knowledge-base answers actually use: headings,
/// emphasis, inline code, fenced code blocks and nested lists. Everything
/// else falls through as plain text.
pub fn markdown_to_lines(input: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(input, Options::ENABLE_TABLES);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut heading: Option<HeadingLevel> = None;
    let mut list_depth = 0usize;
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut spans, &mut lines);
                heading = Some(level);
                let marker = "#".repeat(heading_rank(level));
                spans.push(Span::styled(format!("{} ", marker), heading_style(level)));
            }
            Event::Start(Tag::Strong) => bold += 1,
            Event::Start(Tag::Emphasis) => italic += 1,
            Event::Start(Tag::List(_)) => {
                flush(&mut spans, &mut lines);
                list_depth += 1;
            }
            Event::Start(Tag::Item) => {
                flush(&mut spans, &mut lines);
                if list_depth > 1 {
                    spans.push(Span::raw("  ".repeat(list_depth - 1)));
                }
                spans.push(Span::styled("- ", Style::default().fg(Color::Yellow)));
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                flush(&mut spans, &mut lines);
                in_code_block = true;
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                lines.push(Line::from(Span::styled(
                    format!("```{}", lang),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Event::End(TagEnd::Heading(_)) => {
                flush(&mut spans, &mut lines);
                heading = None;
            }
            Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => {
                flush(&mut spans, &mut lines);
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(Line::from(Span::styled(
                    "```".to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        lines.push(Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(Color::Gray),
                        )));
                    }
                } else {
                    spans.push(Span::styled(
                        text.into_string(),
                        text_style(bold > 0, italic > 0, heading),
                    ));
                }
            }
            Event::Code(code) => {
                spans.push(Span::styled(
                    format!("`{}`", code),
                    Style::default().fg(Color::Yellow),
                ));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut spans, &mut lines),
            _ => {}
        }
    }
    flush(&mut spans, &mut lines);

    lines
}

fn flush(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn heading_rank(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let color = match level {
        HeadingLevel::H1 => Color::Cyan,
        HeadingLevel::H2 => Color::Blue,
        _ => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn text_style(bold: bool, italic: bool, heading: Option<HeadingLevel>) -> Style {
    let mut style = match heading {
        Some(level) => heading_style(level),
        None => Style::default(),
    };
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn bullet_lists_become_prefixed_lines() {
        let lines = markdown_to_lines("- one\n- two");

        assert_eq!(rendered(&lines), vec!["- one", "- two"]);
    }

    #[test]
    fn code_blocks_keep_their_fences() {
        let lines = markdown_to_lines("```rust\nlet x = 1;\n```");

        assert_eq!(rendered(&lines), vec!["```rust", "let x = 1;", "```"]);
    }

    #[test]
    fn bold_text_is_emphasized() {
        let lines = markdown_to_lines("**important** note");

        assert_eq!(rendered(&lines), vec!["important note"]);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[0].spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn headings_keep_their_markers() {
        let lines = markdown_to_lines("## Threat vectors");

        assert_eq!(rendered(&lines), vec!["## Threat vectors"]);
    }
}
