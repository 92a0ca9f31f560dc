//! Terminal painter: repaints the whole transcript from the view model.
//!
//! The painter is dumb on purpose; all text shaping happens in the core
//! renderer. This module only maps typed blocks to styled terminal lines.

use std::io::{self, Write};

use askforge_core::{render_message, theme_for, AppViewModel, Block, Inline, MessageView, Role};
use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

const TITLE: &str = "AskForge";
const TAGLINE: &str = "Forging Answers, Igniting Curiosity";
const FOOTER: &str = "AskForge can make mistakes. Please verify important information.";

/// Clears the screen and paints the full transcript, footer and prompt.
pub fn repaint(view: &AppViewModel) -> io::Result<()> {
    let width = crossterm::terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    let mut out = io::stdout();
    out.queue(Clear(ClearType::All))?;
    out.queue(MoveTo(0, 0))?;

    writeln!(out, "{}", TITLE.bold())?;
    writeln!(out, "{}", TAGLINE.dim())?;
    writeln!(out)?;

    for message in &view.messages {
        paint_message(&mut out, message, width)?;
    }

    writeln!(out, "{}", FOOTER.dim())?;
    if view.busy {
        writeln!(out, "{}", "...".dim())?;
    } else {
        write!(out, "> {}", view.input)?;
    }
    out.flush()
}

fn paint_message(out: &mut impl Write, message: &MessageView, width: usize) -> io::Result<()> {
    let theme = theme_for(message.role);

    if message.role == Role::User {
        write_trailing(out, &format!("{}:", theme.speaker), width, true)?;
        for line in message.content.lines() {
            write_trailing(out, line, width, false)?;
        }
        writeln!(out)?;
        return Ok(());
    }

    // Stage markers are transient status text, not answers.
    if message.stage_marker {
        writeln!(out, "{}", message.content.as_str().dim().italic())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", format!("{}:", theme.speaker).bold().green())?;
    let rendered = render_message(message.role, &message.content);
    for block in &rendered.blocks {
        paint_block(out, block)?;
    }
    if !rendered.sources.is_empty() {
        writeln!(out, "{}", "Sources:".bold())?;
        for source in &rendered.sources {
            writeln!(out, "  - {} ({})", source.name, source.url.as_str().underlined())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn paint_block(out: &mut impl Write, block: &Block) -> io::Result<()> {
    match block {
        Block::Paragraph(inlines) => {
            paint_inlines(out, inlines)?;
            writeln!(out)?;
            writeln!(out)?;
        }
        Block::Heading { level, text } => {
            for _ in 0..*level {
                write!(out, "#")?;
            }
            write!(out, " ")?;
            let plain = inline_text(text);
            writeln!(out, "{}", plain.as_str().bold())?;
            writeln!(out)?;
        }
        Block::CodeBlock { language, code } => {
            if let Some(language) = language {
                writeln!(out, "{}", format!("[{language}]").dim())?;
            }
            for line in code.lines() {
                writeln!(out, "    {}", line.yellow())?;
            }
            writeln!(out)?;
        }
        Block::List { ordered, items } => {
            for (index, item) in items.iter().enumerate() {
                if *ordered {
                    write!(out, "  {}. ", index + 1)?;
                } else {
                    write!(out, "  - ")?;
                }
                paint_inlines(out, item)?;
                writeln!(out)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn paint_inlines(out: &mut impl Write, inlines: &[Inline]) -> io::Result<()> {
    for inline in inlines {
        match inline {
            Inline::Text(text) => write!(out, "{text}")?,
            Inline::Code(code) => write!(out, "{}", code.as_str().yellow())?,
            Inline::Strong(text) => write!(out, "{}", text.as_str().bold())?,
            Inline::Emphasis(text) => write!(out, "{}", text.as_str().italic())?,
        }
    }
    Ok(())
}

fn inline_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text)
            | Inline::Code(text)
            | Inline::Strong(text)
            | Inline::Emphasis(text) => out.push_str(text),
        }
    }
    out
}

/// Right-aligns one line of user text.
fn write_trailing(out: &mut impl Write, line: &str, width: usize, speaker: bool) -> io::Result<()> {
    let pad = width.saturating_sub(line.chars().count());
    for _ in 0..pad {
        write!(out, " ")?;
    }
    if speaker {
        writeln!(out, "{}", line.bold().blue())
    } else {
        writeln!(out, "{}", line.blue())
    }
}
