//! AskForge core: pure conversation state machine and renderer helpers.
mod citation;
mod effect;
mod markup;
mod message;
mod msg;
mod stages;
mod state;
mod update;
mod view_model;

pub use citation::{extract_citations, CitationLink};
pub use effect::Effect;
pub use markup::{
    parse_blocks, render_message, theme_for, Alignment, Block, Inline, MessageTheme,
    RenderedMessage,
};
pub use message::{Message, Role};
pub use msg::Msg;
pub use stages::{STAGE_DELAY, STAGE_LABELS};
pub use state::{AppState, Phase};
pub use update::update;
pub use view_model::{AppViewModel, MessageView};
