//! Main chat loop orchestration.
//!
//! Wires the embedder, vector index, memory orchestrator, and chat provider
//! together, then drives the input loop: slash commands, `remember`/`recall`
//! prefixes, and ordinary memory-aware turns with automatic fact extraction.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use tracing::Instrument;

use membot_core::chat::service::ChatService;
use membot_core::memory::buffer::ShortTermBuffer;
use membot_core::memory::extractor::extract_facts;
use membot_core::memory::orchestrator::MemoryOrchestrator;
use membot_core::memory::store::LongTermStore;
use membot_infra::config::{default_data_dir, load_app_config};
use membot_infra::llm::openai::OpenAiChatProvider;
use membot_infra::vector::embedder::HashEmbedder;
use membot_infra::vector::index::InMemoryVectorIndex;
use membot_observe::genai_attrs;
use membot_types::llm::MessageRole;
use membot_types::memory::{MemoryMetadata, MetadataValue};

use crate::cli::ChatArgs;

use super::commands::{self, ChatCommand, MemoryRequest};
use super::input::{ChatInput, InputEvent};

/// Memories shown for an explicit `recall`, more generous than the per-turn
/// retrieval depth.
const RECALL_TOP_K: usize = 3;

type Service = ChatService<OpenAiChatProvider, InMemoryVectorIndex, HashEmbedder>;

/// Run the interactive chat loop.
pub async fn run_chat_loop(args: &ChatArgs) -> anyhow::Result<()> {
    let config = load_app_config(&default_data_dir()).await;

    // Flag overrides win over config.toml.
    let model = args.model.clone().unwrap_or(config.chat.model);
    let capacity = args.capacity.unwrap_or(config.memory.buffer_capacity);
    let top_k = args.top_k.unwrap_or(config.memory.retrieval_top_k);
    let max_tokens = args.max_tokens.unwrap_or(config.chat.max_tokens);

    let api_key = args.api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY not set. Export it or pass --api-key.")
    })?;
    let provider = match args.base_url.as_deref() {
        Some(base_url) => OpenAiChatProvider::with_base_url(api_key, base_url),
        None => OpenAiChatProvider::new(api_key),
    };

    let embedder = HashEmbedder::new(config.memory.embedding_dimension);
    let store = LongTermStore::new(InMemoryVectorIndex::new(), embedder);
    store.initialize(config.memory.reset_on_init).await?;

    let orchestrator = MemoryOrchestrator::new(
        ShortTermBuffer::new(capacity),
        store,
        top_k,
        config.chat.system_prompt,
    );
    let mut service = ChatService::new(provider, orchestrator, model, max_tokens);

    print_banner(service.model(), capacity, top_k);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    if handle_command(cmd, &mut service, &mut chat_input).await? {
                        break;
                    }
                    continue;
                }

                if let Some(request) = commands::parse_memory_request(&text) {
                    handle_memory_request(request, &service).await;
                    continue;
                }

                run_turn(&mut service, &text).await;
            }
        }
    }

    Ok(())
}

/// Handle a slash command. Returns `true` when the loop should exit.
async fn handle_command(
    cmd: ChatCommand,
    service: &mut Service,
    chat_input: &mut ChatInput,
) -> anyhow::Result<bool> {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => {
            println!("\n  {}", style("Session ended.").dim());
            return Ok(true);
        }
        ChatCommand::History => print_history(service),
        ChatCommand::Stats => print_stats(service),
        ChatCommand::Memories => print_memories(service).await,
        ChatCommand::Count => {
            let count = service.orchestrator().long_term().count().await;
            println!(
                "\n  {} long-term memor{}\n",
                style(count).bold(),
                if count == 1 { "y" } else { "ies" }
            );
        }
        ChatCommand::Reset => {
            service.orchestrator_mut().buffer_mut().clear();
            println!("\n  {} Conversation buffer cleared.\n", style("*").cyan().bold());
        }
        ChatCommand::Wipe => wipe_memories(service).await?,
        ChatCommand::Unknown(cmd_name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(cmd_name).dim()
            );
        }
    }
    Ok(false)
}

/// Handle a `remember`/`recall` prefix without a chat round-trip.
async fn handle_memory_request(request: MemoryRequest, service: &Service) {
    match request {
        MemoryRequest::Remember(fact) => {
            tracing::debug!(
                gen_ai.operation.name = genai_attrs::OP_REMEMBER,
                "explicit memory persist"
            );
            let mut metadata = MemoryMetadata::new();
            metadata.insert("source".to_string(), MetadataValue::from("explicit"));
            match service.orchestrator().remember(&fact, metadata).await {
                Ok(_) => println!(
                    "\n  {} Remembered: {}\n",
                    style("*").cyan().bold(),
                    style(&fact).dim()
                ),
                Err(e) => println!(
                    "\n  {} Failed to save memory: {e}\n",
                    style("!").red().bold()
                ),
            }
        }
        MemoryRequest::Recall(query) => {
            tracing::debug!(
                gen_ai.operation.name = genai_attrs::OP_RECALL,
                "direct memory recall"
            );
            match service
                .orchestrator()
                .long_term()
                .query(&query, RECALL_TOP_K)
                .await
            {
                Ok(memories) if memories.is_empty() => {
                    println!("\n  {} Nothing recalled for that query.\n", style("i").blue().bold());
                }
                Ok(memories) => {
                    println!();
                    for (i, memory) in memories.iter().enumerate() {
                        println!(
                            "  {}. {} {}",
                            i + 1,
                            memory.text,
                            style(format!("({:.0}%)", memory.similarity * 100.0)).dim()
                        );
                    }
                    println!();
                }
                Err(e) => {
                    println!("\n  {} Recall failed: {e}\n", style("!").red().bold());
                }
            }
        }
    }
}

/// One ordinary memory-aware turn, plus automatic fact extraction.
async fn run_turn(service: &mut Service, text: &str) {
    let span = tracing::info_span!(
        "gen_ai.chat",
        gen_ai.operation.name = genai_attrs::OP_CHAT,
        gen_ai.provider.name = genai_attrs::PROVIDER_OPENAI,
        gen_ai.request.model = service.model(),
    );

    match service.send(text).instrument(span).await {
        Ok(turn) => {
            println!("\n  {}", turn.reply.trim());
            println!(
                "  {}\n",
                style(format!(
                    "{} tokens, {:.1}s, {} memor{} used",
                    turn.tokens_used,
                    turn.elapsed_ms as f64 / 1000.0,
                    turn.used_memories.len(),
                    if turn.used_memories.len() == 1 { "y" } else { "ies" }
                ))
                .dim()
            );
        }
        Err(e) => {
            println!("\n  {} {e}\n", style("!").red().bold());
            return;
        }
    }

    // Persist anything the extractors spotted in the user message.
    for fact in extract_facts(text) {
        let mut metadata = MemoryMetadata::new();
        metadata.insert("source".to_string(), MetadataValue::from("extracted"));
        metadata.insert(
            "kind".to_string(),
            MetadataValue::Str(format!("{:?}", fact.kind).to_lowercase()),
        );
        match service.orchestrator().remember(&fact.text, metadata).await {
            Ok(_) => println!(
                "  {} {}\n",
                style("* noted:").cyan(),
                style(&fact.text).dim()
            ),
            Err(e) => tracing::warn!(error = %e, "failed to persist extracted fact"),
        }
    }
}

/// Truncate to at most `max` characters with a trailing ellipsis,
/// counting chars rather than bytes so multi-byte content never splits
/// mid-character.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{truncated}...")
}

fn print_banner(model: &str, capacity: usize, top_k: usize) {
    println!();
    println!(
        "  {} membot -- chat with memory",
        style("@").cyan().bold()
    );
    println!(
        "  {}",
        style(format!(
            "model {model}, buffer {capacity}, recall {top_k} per turn"
        ))
        .dim()
    );
    println!("  {}", style("Type /help for commands").dim());
    println!();
}

fn print_history(service: &Service) {
    let buffer = service.orchestrator().buffer();
    if buffer.is_empty() {
        println!("\n  {} Buffer is empty.\n", style("i").blue().bold());
        return;
    }

    println!();
    for msg in buffer.snapshot() {
        let role_label = match msg.role {
            MessageRole::User => format!("{}", style("You").green().bold()),
            MessageRole::Assistant => format!("{}", style("Bot").cyan().bold()),
            MessageRole::System => format!("{}", style("System").dim()),
        };
        println!("  {role_label} {}", preview(&msg.content, 100));
    }
    println!();
}

fn print_stats(service: &Service) {
    let stats = service.orchestrator().buffer().stats();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Messages").fg(Color::White),
        Cell::new("User").fg(Color::White),
        Cell::new("Assistant").fg(Color::White),
        Cell::new("Avg length").fg(Color::White),
        Cell::new("Capacity").fg(Color::White),
    ]);
    table.add_row(vec![
        Cell::new(stats.total),
        Cell::new(stats.user).fg(Color::Green),
        Cell::new(stats.assistant).fg(Color::Cyan),
        Cell::new(stats.avg_content_len),
        Cell::new(stats.capacity).fg(Color::DarkGrey),
    ]);

    println!();
    println!("{table}");
    println!();
}

async fn print_memories(service: &Service) {
    let records = match service.orchestrator().long_term().all().await {
        Ok(records) => records,
        Err(e) => {
            println!("\n  {} Could not list memories: {e}\n", style("!").red().bold());
            return;
        }
    };

    if records.is_empty() {
        println!(
            "\n  {} No long-term memories yet. Use `remember <fact>` to add one.\n",
            style("i").blue().bold()
        );
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Memory").fg(Color::White),
        Cell::new("Source").fg(Color::White),
        Cell::new("Date").fg(Color::White),
    ]);

    for record in &records {
        let text_display = preview(&record.text, 60);
        let source = record
            .metadata
            .get("source")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let date = record.created_at.format("%Y-%m-%d").to_string();

        table.add_row(vec![
            Cell::new(text_display).fg(Color::White),
            Cell::new(source).fg(Color::DarkGrey),
            Cell::new(date).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} memor{}",
        style(records.len()).bold(),
        if records.len() == 1 { "y" } else { "ies" }
    );
    println!();
}

async fn wipe_memories(service: &Service) -> anyhow::Result<()> {
    let count = service.orchestrator().long_term().count().await;
    if count == 0 {
        println!("\n  {} No memories to delete.\n", style("i").blue().bold());
        return Ok(());
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Wipe all {} long-term memories? This cannot be undone.",
            style(count).bold()
        ))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("  Cancelled.");
        return Ok(());
    }

    match service.orchestrator().long_term().clear().await {
        Ok(()) => println!(
            "\n  {} Wiped {} memor{}.\n",
            style("x").red().bold(),
            count,
            if count == 1 { "y" } else { "ies" }
        ),
        Err(e) => println!("\n  {} Wipe failed: {e}\n", style("!").red().bold()),
    }
    Ok(())
}
