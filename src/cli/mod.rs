//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the
//! appropriate commands.

pub mod brief_list;
pub mod model_list;
pub mod provider_list;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::cli::brief_list::list_briefs;
use crate::cli::model_list::list_models;
use crate::cli::provider_list::list_providers;
use crate::core::app::AppInit;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_debug_log;

#[derive(Parser)]
#[command(name = "osgood")]
#[command(about = "A terminal workbench for legal research chat")]
#[command(
    long_about = "Osgood is a full-screen terminal workbench for legal research chat. It runs \
several simulated AI conversations side by side, with a case-brief library for \
reference material. Replies, search results, and sign-in are all simulated with \
fixed delays; nothing leaves your terminal.\n\n\
Controls:\n\
  Type              Enter your message in the composer\n\
  Enter             Send to every open pane\n\
  Alt+Enter         Insert a new line\n\
  Ctrl+B / Ctrl+G   Toggle the left / right sidebar\n\
  Ctrl+F            Search case briefs\n\
  Ctrl+N / Ctrl+P   New pane / pick provider and model\n\
  Esc               Interrupt the pending reply or close the active overlay\n\
  Ctrl+C            Quit the application\n\n\
Commands:\n\
  /help             Show extended help inside a conversation\n\
  /add, /close, /main, /temp, /complexity, /briefs, /view, /playground,\n\
  /profile, /theme, /log, /dump, /clear"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat, or list available models if no model specified
    #[arg(short = 'm', long, global = true, value_name = "MODEL", num_args = 0..=1, default_missing_value = "")]
    pub model: Option<String>,

    /// Provider to use, or list available providers if no provider specified
    #[arg(short = 'p', long, global = true, value_name = "PROVIDER", num_args = 0..=1, default_missing_value = "")]
    pub provider: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Theme override for this session
    #[arg(long, global = true)]
    pub theme: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Print the case-brief library, optionally filtered
    Briefs {
        /// Filter term matched against name and citation
        term: Option<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words for default-model)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
        /// Value to unset for the key (optional)
        value: Option<String>,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_debug_log()?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Briefs { term } => {
            list_briefs(term.as_deref().unwrap_or(""));
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "default-provider" => match value.filter(|v| !v.is_empty()) {
                    Some(val) => {
                        config.default_provider = Some(val.join(" "));
                        config.save()?;
                        println!("✅ Set default-provider to: {}", val.join(" "));
                    }
                    None => config.print_all(),
                },
                "default-model" => match value.filter(|v| !v.is_empty()) {
                    Some(val) => {
                        // Join all parts to handle multi-word model names
                        let val_str = val.join(" ");
                        match val_str.split_once(' ') {
                            Some((provider, model)) => {
                                config
                                    .set_default_model(provider.to_string(), model.to_string());
                                config.save()?;
                                println!(
                                    "✅ Set default-model for provider '{provider}' to: {model}"
                                );
                            }
                            None => {
                                eprintln!(
                                    "⚠️  To set a default model, specify the provider and model:"
                                );
                                eprintln!("Example: osgood set default-model OpenAI GPT-4o");
                            }
                        }
                    }
                    None => config.print_all(),
                },
                "theme" => match value.filter(|v| !v.is_empty()) {
                    Some(val) => {
                        config.theme = Some(val.join(" "));
                        config.save()?;
                        println!("✅ Set theme to: {}", val.join(" "));
                    }
                    None => config.print_all(),
                },
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "default-provider" => {
                    config.default_provider = None;
                    config.save()?;
                    println!("✅ Unset default-provider");
                }
                "default-model" => match value {
                    Some(provider) => {
                        config.unset_default_model(&provider);
                        config.save()?;
                        println!("✅ Unset default-model for provider: {provider}");
                    }
                    None => {
                        eprintln!("⚠️  To unset a default model, specify the provider:");
                        eprintln!("Example: osgood unset default-model OpenAI");
                    }
                },
                "theme" => {
                    config.theme = None;
                    config.save()?;
                    println!("✅ Unset theme");
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Chat => {
            // -p without a value lists providers; -m without a value lists
            // models for the (optional) provider.
            match args.provider.as_deref() {
                Some("") => {
                    list_providers();
                    Ok(())
                }
                _ => {
                    let provider = args.provider.filter(|p| !p.is_empty());
                    match args.model.as_deref() {
                        Some("") => {
                            list_models(provider.as_deref());
                            Ok(())
                        }
                        _ => {
                            run_chat(AppInit {
                                provider,
                                model: args.model,
                                log_file: args.log,
                                theme_override: args.theme,
                            })
                            .await
                        }
                    }
                }
            }
        }
    }
}
