//! Pure renderer: (role, content) to a typed document.
//!
//! Citation links are split off first, then the remaining body is parsed
//! as markdown into a flat list of blocks. The painter decides how each
//! block looks; role only selects alignment and coloring, never content.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::citation::{extract_citations, CitationLink};
use crate::Role;

/// Headings deeper than this render with the same treatment as level 3.
const MAX_HEADING_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(String),
    Emphasis(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, text: Vec<Inline> },
    CodeBlock { language: Option<String>, code: String },
    List { ordered: bool, items: Vec<Vec<Inline>> },
}

/// Which side of the transcript a message sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Leading,
    Trailing,
}

/// Role-dependent visual treatment. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTheme {
    pub alignment: Alignment,
    pub speaker: &'static str,
}

pub fn theme_for(role: Role) -> MessageTheme {
    match role {
        Role::User => MessageTheme {
            alignment: Alignment::Trailing,
            speaker: "You",
        },
        Role::Assistant | Role::System => MessageTheme {
            alignment: Alignment::Leading,
            speaker: "AskForge",
        },
    }
}

/// A message ready for painting. `sources` being empty means the Sources
/// section is suppressed entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub role: Role,
    pub blocks: Vec<Block>,
    pub sources: Vec<CitationLink>,
}

/// Stateless entry point: extracts citations, parses the body.
pub fn render_message(role: Role, content: &str) -> RenderedMessage {
    let (body, sources) = extract_citations(content);
    RenderedMessage {
        role,
        blocks: parse_blocks(&body),
        sources,
    }
}

/// Folds the markdown event stream into flat blocks. Nested lists are
/// flattened; block quotes and other unhandled containers contribute
/// their inline content to the surrounding block.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    for event in Parser::new(markdown) {
        builder.push_event(event);
    }
    builder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineStyle {
    Strong,
    Emphasis,
}

#[derive(Debug, Default)]
struct ListBuilder {
    ordered: bool,
    items: Vec<Vec<Inline>>,
    /// Depth of nested lists folded into this one.
    nesting: usize,
}

#[derive(Debug, Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    inlines: Vec<Inline>,
    styles: Vec<InlineStyle>,
    code: Option<(Option<String>, String)>,
    list: Option<ListBuilder>,
}

impl BlockBuilder {
    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => self.flush_paragraph(),
            Event::Start(Tag::Heading { .. }) => self.flush_paragraph(),
            Event::End(TagEnd::Heading(level)) => {
                let text = std::mem::take(&mut self.inlines);
                self.blocks.push(Block::Heading {
                    level: (level as u8).min(MAX_HEADING_LEVEL),
                    text,
                });
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                self.flush_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = self.code.take() {
                    self.blocks.push(Block::CodeBlock { language, code });
                }
            }
            Event::Start(Tag::List(start)) => match self.list.as_mut() {
                Some(list) => list.nesting += 1,
                None => {
                    self.flush_paragraph();
                    self.list = Some(ListBuilder {
                        ordered: start.is_some(),
                        ..ListBuilder::default()
                    });
                }
            },
            Event::End(TagEnd::List(_)) => {
                let done = match self.list.as_mut() {
                    Some(list) if list.nesting > 0 => {
                        list.nesting -= 1;
                        false
                    }
                    Some(_) => true,
                    None => false,
                };
                if done {
                    if let Some(list) = self.list.take() {
                        self.blocks.push(Block::List {
                            ordered: list.ordered,
                            items: list.items,
                        });
                    }
                }
            }
            Event::Start(Tag::Item) => {}
            Event::End(TagEnd::Item) => {
                let item = std::mem::take(&mut self.inlines);
                if let Some(list) = self.list.as_mut() {
                    list.items.push(item);
                }
            }
            Event::Start(Tag::Strong) => self.styles.push(InlineStyle::Strong),
            Event::End(TagEnd::Strong) => {
                self.styles.pop();
            }
            Event::Start(Tag::Emphasis) => self.styles.push(InlineStyle::Emphasis),
            Event::End(TagEnd::Emphasis) => {
                self.styles.pop();
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.inlines.push(Inline::Code(code.to_string())),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some((_, code)) = self.code.as_mut() {
            code.push_str(text);
            return;
        }
        let inline = match self.styles.last() {
            Some(InlineStyle::Strong) => Inline::Strong(text.to_string()),
            Some(InlineStyle::Emphasis) => Inline::Emphasis(text.to_string()),
            None => Inline::Text(text.to_string()),
        };
        self.inlines.push(inline);
    }

    /// Closes the current inline run as a paragraph, unless it belongs to a
    /// list item (those are closed by `End(Item)`).
    fn flush_paragraph(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        if self.list.is_some() {
            return;
        }
        let inlines = std::mem::take(&mut self.inlines);
        self.blocks.push(Block::Paragraph(inlines));
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_paragraph();
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List {
                ordered: list.ordered,
                items: list.items,
            });
        }
        if let Some((language, code)) = self.code.take() {
            self.blocks.push(Block::CodeBlock { language, code });
        }
        self.blocks
    }
}
