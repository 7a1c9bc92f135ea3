//! Slash-command parsing and execution
//!
//! Input beginning with `/` is matched against the command registry; every
//! other line is a chat prompt. Unknown commands fall through as prompts,
//! matching how the composer treats stray slashes.

mod registry;

pub use registry::{all_commands, find_command, Command, CommandInvocation};

use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::app::App;
use crate::core::library;
use crate::core::message::Message;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    OpenProviderPicker,
    OpenThemePicker,
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation {
            input: trimmed,
            args,
        };
        (command.handler)(app, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from(
        "Keyboard shortcuts:\n\
         Enter send · Alt+Enter newline · Esc cancel/close · Ctrl+C quit\n\
         Ctrl+B left sidebar · Ctrl+G right sidebar · Ctrl+E composer options\n\
         Ctrl+N new pane · Ctrl+P pick provider/model · Ctrl+F search briefs\n\n\
         Commands:\n",
    );
    for command in all_commands() {
        help.push_str(&format!("{} — {}\n", command.usage, command.help));
    }
    match app.workspace.main_conversation_mut() {
        Some(conv) => conv.push(Message::system(help)),
        None => app.ui.set_status("Open a pane to see /help output."),
    }
    CommandResult::Continue
}

pub(super) fn handle_add(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::OpenProviderPicker;
    }
    match invocation.args.split_once(' ') {
        Some((provider, model)) if !model.trim().is_empty() => {
            app.add_pane(provider.trim(), model.trim());
            CommandResult::Continue
        }
        _ => {
            app.ui.set_status("Usage: /add <provider> <model>");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_close(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let target = if invocation.args.is_empty() {
        app.workspace.main_conversation_id()
    } else {
        invocation.args.parse::<u64>().ok()
    };
    match target {
        Some(id) if app.workspace.close_conversation(id) => {
            app.ui.set_status(format!("Closed pane {id}."));
        }
        Some(id) => app.ui.set_status(format!("No pane with id {id}.")),
        None => app.ui.set_status("Nothing to close."),
    }
    CommandResult::Continue
}

pub(super) fn handle_main(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args.parse::<u64>() {
        Ok(id) if app.workspace.set_main(id) => {
            app.ui.set_status(format!("Pane {id} is now main."));
        }
        Ok(id) => app.ui.set_status(format!("No pane with id {id}.")),
        Err(_) => app.ui.set_status("Usage: /main <id>"),
    }
    CommandResult::Continue
}

pub(super) fn handle_temp(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let parts: Vec<&str> = invocation.args.split_whitespace().collect();
    let (target, value) = match parts.as_slice() {
        [value] => (app.workspace.main_conversation_id(), value.parse::<f64>()),
        [id, value] => (id.parse::<u64>().ok(), value.parse::<f64>()),
        _ => {
            app.ui.set_status("Usage: /temp [id] <value>");
            return CommandResult::Continue;
        }
    };
    match (target, value) {
        (Some(id), Ok(value)) if app.workspace.set_temperature(id, value) => {
            let shown = app
                .workspace
                .get(id)
                .map(|c| c.parameters.temperature)
                .unwrap_or(value);
            app.ui
                .set_status(format!("Temperature of pane {id} set to {shown:.1}."));
        }
        (Some(id), Ok(_)) => app.ui.set_status(format!("No pane with id {id}.")),
        _ => app.ui.set_status("Usage: /temp [id] <value>"),
    }
    CommandResult::Continue
}

pub(super) fn handle_complexity(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args.parse::<i32>() {
        Ok(delta) => {
            if app.workspace.adjust_complexity(delta) {
                app.ui
                    .set_status(format!("Complexity adjusted by {delta}."));
            } else {
                app.ui.set_status("No AI response to adjust.");
            }
        }
        Err(_) => app.ui.set_status("Usage: /complexity <delta>"),
    }
    CommandResult::Continue
}

pub(super) fn handle_briefs(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    app.open_brief_search();
    if !invocation.args.is_empty() {
        if let Some(search) = app.ui.search.as_mut() {
            search.term = invocation.args.to_string();
        }
        app.search_term_changed();
    }
    CommandResult::Continue
}

pub(super) fn handle_view(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        app.ui.set_status("Usage: /view <brief id or name>");
        return CommandResult::Continue;
    }
    match library::find_brief(invocation.args) {
        Some(brief) => app.view_brief_on_main(brief),
        None => app
            .ui
            .set_status(format!("No case brief matching '{}'.", invocation.args)),
    }
    CommandResult::Continue
}

pub(super) fn handle_playground(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.open_playground();
    CommandResult::Continue
}

pub(super) fn handle_profile(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.show_profile();
    CommandResult::Continue
}

pub(super) fn handle_theme(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        return CommandResult::OpenThemePicker;
    }
    app.apply_theme(invocation.args);
    CommandResult::Continue
}

pub(super) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let result = if invocation.args.is_empty() {
        app.session.logging.toggle_logging()
    } else {
        app.session.logging.set_log_file(invocation.args.to_string())
    };
    match result {
        Ok(message) => app.ui.set_status(message),
        Err(e) => app.ui.set_status(format!("Log error: {e}")),
    }
    CommandResult::Continue
}

pub(super) fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let filename = if invocation.args.is_empty() {
        format!("osgood-log-{}.txt", Utc::now().format("%Y-%m-%d"))
    } else {
        invocation.args.to_string()
    };
    match dump_conversation(app, &filename) {
        Ok(()) => app.ui.set_status(format!("Conversation dumped to {filename}.")),
        Err(e) => app.ui.set_status(format!("Dump error: {e}")),
    }
    CommandResult::Continue
}

pub(super) fn handle_clear(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    match app.workspace.main_conversation_id() {
        Some(id) => {
            app.workspace.clear_messages(id);
            app.ui.set_status("Main conversation cleared.");
        }
        None => app.ui.set_status("Nothing to clear."),
    }
    CommandResult::Continue
}

fn dump_conversation(app: &App, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(conv) = app.workspace.main_conversation() else {
        return Err("No main conversation to dump.".into());
    };
    if std::path::Path::new(filename).exists() {
        return Err(format!("File '{filename}' already exists.").into());
    }

    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    if filename.ends_with(".json") {
        serde_json::to_writer_pretty(&mut writer, conv)?;
        writer.write_all(b"\n")?;
    } else {
        for msg in &conv.messages {
            if msg.is_user() {
                writeln!(writer, "{}: {}", app.session.user_display_name(), msg.content)?;
            } else {
                writeln!(writer, "{}", msg.content)?;
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
