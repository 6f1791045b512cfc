//! Terminal formatter: the text layout with a colored header.

use owo_colors::OwoColorize;

use resmsg_core::{
    application::ports::Formatter,
    domain::{FormatterOptions, Message, MessageType},
    error::ResmsgResult,
};

use super::text::render_lines;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub const NAME: &'static str = "console";

    pub fn new() -> Self {
        Self
    }
}

impl Formatter for ConsoleFormatter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(&self, message: &Message, options: &FormatterOptions) -> ResmsgResult<String> {
        if options.use_colors {
            Ok(render_lines(message, options, &paint))
        } else {
            Ok(render_lines(message, options, &|_, header| header.to_string()))
        }
    }
}

fn paint(message_type: MessageType, text: &str) -> String {
    match message_type {
        MessageType::Success => text.green().bold().to_string(),
        MessageType::Info => text.blue().bold().to_string(),
        MessageType::Warning => text.yellow().bold().to_string(),
        MessageType::Error => text.red().bold().to_string(),
        MessageType::Critical => text.white().on_red().bold().to_string(),
    }
}
