use askforge_core::{parse_blocks, theme_for, Alignment, Block, Inline, Role};
use pretty_assertions::assert_eq;

#[test]
fn paragraphs_carry_styled_inline_runs() {
    let blocks = parse_blocks("plain **bold** and *leaning* and `code`");

    assert_eq!(
        blocks,
        vec![Block::Paragraph(vec![
            Inline::Text("plain ".to_string()),
            Inline::Strong("bold".to_string()),
            Inline::Text(" and ".to_string()),
            Inline::Emphasis("leaning".to_string()),
            Inline::Text(" and ".to_string()),
            Inline::Code("code".to_string()),
        ])]
    );
}

#[test]
fn headings_keep_levels_one_through_three() {
    let blocks = parse_blocks("# One\n\n## Two\n\n### Three");

    let levels: Vec<u8> = blocks
        .iter()
        .map(|b| match b {
            Block::Heading { level, .. } => *level,
            other => panic!("expected heading, got {other:?}"),
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3]);
}

#[test]
fn deep_headings_clamp_to_level_three() {
    let blocks = parse_blocks("##### Five");

    assert_eq!(
        blocks,
        vec![Block::Heading {
            level: 3,
            text: vec![Inline::Text("Five".to_string())],
        }]
    );
}

#[test]
fn fenced_code_blocks_keep_language_and_body() {
    let blocks = parse_blocks("```rust\nlet x = 1;\n```");

    assert_eq!(
        blocks,
        vec![Block::CodeBlock {
            language: Some("rust".to_string()),
            code: "let x = 1;\n".to_string(),
        }]
    );
}

#[test]
fn bullet_and_ordered_lists_are_distinguished() {
    let blocks = parse_blocks("- alpha\n- beta\n\n1. first\n2. second");

    assert_eq!(
        blocks,
        vec![
            Block::List {
                ordered: false,
                items: vec![
                    vec![Inline::Text("alpha".to_string())],
                    vec![Inline::Text("beta".to_string())],
                ],
            },
            Block::List {
                ordered: true,
                items: vec![
                    vec![Inline::Text("first".to_string())],
                    vec![Inline::Text("second".to_string())],
                ],
            },
        ]
    );
}

#[test]
fn soft_breaks_join_as_spaces() {
    let blocks = parse_blocks("one\ntwo");

    assert_eq!(
        blocks,
        vec![Block::Paragraph(vec![
            Inline::Text("one".to_string()),
            Inline::Text(" ".to_string()),
            Inline::Text("two".to_string()),
        ])]
    );
}

#[test]
fn role_selects_alignment_and_speaker_only() {
    let user = theme_for(Role::User);
    let assistant = theme_for(Role::Assistant);

    assert_eq!(user.alignment, Alignment::Trailing);
    assert_eq!(user.speaker, "You");
    assert_eq!(assistant.alignment, Alignment::Leading);
    assert_eq!(assistant.speaker, "AskForge");
}
