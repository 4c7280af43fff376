//! Slash command and natural-prefix parsing for the chat loop.
//!
//! Slash commands start with `/` and provide in-chat controls. The two
//! natural prefixes, `remember <fact>` and `recall <query>`, address memory
//! directly without going through the chat collaborator.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Show the short-term conversation buffer.
    History,
    /// Show short-term buffer statistics.
    Stats,
    /// List all long-term memories.
    Memories,
    /// Show the long-term memory count.
    Count,
    /// Clear the short-term buffer.
    Reset,
    /// Wipe all long-term memories (with confirmation).
    Wipe,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Natural-language memory prefixes.
#[derive(Debug, PartialEq)]
pub enum MemoryRequest {
    /// `remember <fact>`: persist a fact to long-term memory.
    Remember(String),
    /// `recall <query>`: query long-term memory directly.
    Recall(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed.split_whitespace().next().unwrap_or(trimmed);
    match cmd.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/history" => Some(ChatCommand::History),
        "/stats" => Some(ChatCommand::Stats),
        "/memories" => Some(ChatCommand::Memories),
        "/count" => Some(ChatCommand::Count),
        "/reset" => Some(ChatCommand::Reset),
        "/wipe" => Some(ChatCommand::Wipe),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Parse user input as a `remember`/`recall` prefix.
///
/// Returns `None` for ordinary chat messages, or when the prefix carries no
/// argument (a bare "remember" is a legitimate chat message).
pub fn parse_memory_request(input: &str) -> Option<MemoryRequest> {
    let trimmed = input.trim();
    let (prefix, rest) = trimmed.split_once(' ')?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }

    match prefix.to_lowercase().as_str() {
        "remember" => Some(MemoryRequest::Remember(rest.to_string())),
        "recall" => Some(MemoryRequest::Recall(rest.to_string())),
        _ => None,
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!(
        "  {}  {}",
        style("/history").cyan(),
        "Show the conversation buffer"
    );
    println!(
        "  {}    {}",
        style("/stats").cyan(),
        "Short-term buffer statistics"
    );
    println!(
        "  {} {}",
        style("/memories").cyan(),
        "List long-term memories"
    );
    println!(
        "  {}    {}",
        style("/count").cyan(),
        "Long-term memory count"
    );
    println!(
        "  {}    {}",
        style("/reset").cyan(),
        "Clear the conversation buffer"
    );
    println!(
        "  {}     {}",
        style("/wipe").cyan(),
        "Delete all long-term memories"
    );
    println!("  {}    {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}  {}",
        style("remember <fact>").green(),
        "Save a fact to long-term memory"
    );
    println!(
        "  {}   {}",
        style("recall <query>").green(),
        "Search long-term memory"
    );
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
