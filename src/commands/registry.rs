use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands and keyboard shortcuts.",
        handler: super::handle_help,
    },
    Command {
        name: "add",
        usage: "/add [provider model]",
        help: "Open a conversation pane; without arguments, pick interactively.",
        handler: super::handle_add,
    },
    Command {
        name: "close",
        usage: "/close [id]",
        help: "Close a conversation pane (default: the main pane).",
        handler: super::handle_close,
    },
    Command {
        name: "main",
        usage: "/main <id>",
        help: "Promote a conversation pane to the main display area.",
        handler: super::handle_main,
    },
    Command {
        name: "temp",
        usage: "/temp [id] <value>",
        help: "Set a pane's temperature (0.0 to 1.0).",
        handler: super::handle_temp,
    },
    Command {
        name: "complexity",
        usage: "/complexity <delta>",
        help: "Adjust the complexity of the main pane's last AI response.",
        handler: super::handle_complexity,
    },
    Command {
        name: "briefs",
        usage: "/briefs [term]",
        help: "Open the case-brief search overlay.",
        handler: super::handle_briefs,
    },
    Command {
        name: "view",
        usage: "/view <brief>",
        help: "View a case brief on the main display area.",
        handler: super::handle_view,
    },
    Command {
        name: "playground",
        usage: "/playground",
        help: "Transform the main conversation into the playground.",
        handler: super::handle_playground,
    },
    Command {
        name: "profile",
        usage: "/profile",
        help: "Show the signed-in user profile.",
        handler: super::handle_profile,
    },
    Command {
        name: "theme",
        usage: "/theme [name]",
        help: "Open the theme picker or apply a theme directly.",
        handler: super::handle_theme,
    },
    Command {
        name: "log",
        usage: "/log [file]",
        help: "Toggle transcript logging or set the log file path.",
        handler: super::handle_log,
    },
    Command {
        name: "dump",
        usage: "/dump [file]",
        help: "Export the main conversation to a file (.json for JSON).",
        handler: super::handle_dump,
    },
    Command {
        name: "clear",
        usage: "/clear",
        help: "Clear the main conversation's messages.",
        handler: super::handle_clear,
    },
];
