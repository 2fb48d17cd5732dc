#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::Utc;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgGroup;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::cache_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationId;
use crate::domain::models::Settings;
use crate::domain::services::help_text;
use crate::domain::services::html;
use crate::domain::services::render_view;
use crate::domain::services::ComposerInput;
use crate::domain::services::PersistentStore;
use crate::domain::services::QuotaTracker;
use crate::domain::services::SessionState;
use crate::domain::services::Themes;
use crate::infrastructure::storage::StorageManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn format_conversation(position: usize, conversation: &Conversation) -> String {
    return format!(
        "{position}. (ID: {}) {}, {} messages, {}",
        conversation.id,
        conversation.created_at.format("%Y-%m-%d %H:%M"),
        conversation.messages.len(),
        conversation.title
    );
}

async fn load_session() -> SessionState {
    return SessionState::load(PersistentStore::new(StorageManager::get())).await;
}

async fn print_conversations_list() -> Result<()> {
    let session = load_session().await;
    let conversations = session
        .conversations()
        .iter()
        .enumerate()
        .map(|(idx, conversation)| {
            return format_conversation(idx + 1, conversation);
        })
        .collect::<Vec<String>>();

    if conversations.is_empty() {
        println!("There are no conversations available. You should start your first one!");
    } else {
        println!("{}", conversations.join("\n"));
    }

    return Ok(());
}

fn parse_conversation_id(matches: &ArgMatches) -> Result<Option<ConversationId>> {
    if let Some(id) = matches.get_one::<String>("conversation-id") {
        return Ok(Some(id.parse::<ConversationId>()?));
    }

    return Ok(None);
}

async fn export_conversation(matches: &ArgMatches) -> Result<()> {
    let mut session = load_session().await;
    if let Some(id) = parse_conversation_id(matches)? {
        if !session.select_conversation(id) {
            bail!(format!("Conversation {id} does not exist"));
        }
    }

    if session.active_conversation().is_none() {
        bail!("There are no conversations to export");
    }

    let view = render_view(&session, None, &ComposerInput::default());
    let page = html::render_page(&view, session.settings());

    if let Some(output) = matches.get_one::<String>("output") {
        let mut file = fs::File::create(output).await?;
        file.write_all(page.as_bytes()).await?;
        println!("Exported conversation to {output}");
    } else {
        print!("{page}");
    }

    return Ok(());
}

async fn delete_conversations(matches: &ArgMatches) -> Result<()> {
    let mut session = load_session().await;

    if let Some(id) = parse_conversation_id(matches)? {
        if !session.delete_conversation(id).await {
            bail!(format!("Conversation {id} does not exist"));
        }
        println!("Deleted conversation {id}");
    } else if matches.get_flag("all") {
        session.delete_all().await;
        println!("Deleted all conversations");
    } else {
        subcommand_conversations_delete().print_long_help()?;
    }

    return Ok(());
}

async fn set_settings(matches: &ArgMatches) -> Result<()> {
    let mut session = load_session().await;
    let mut settings = session.settings().clone();

    let text_fields: [(&str, &mut String); 6] = [
        ("name", &mut settings.display_name),
        ("avatar", &mut settings.avatar_source),
        ("age", &mut settings.age),
        ("hobby", &mut settings.hobby),
        ("bio", &mut settings.bio),
        ("preferences", &mut settings.preferences),
    ];
    for (id, field) in text_fields {
        if let Some(val) = matches.get_one::<String>(id) {
            *field = val.to_string();
        }
    }

    if let Some(radius) = matches.get_one::<u32>("corner-radius") {
        settings.message_corner_radius = *radius;
    }

    session.update_settings(settings).await;
    print_settings(session.settings())?;

    return Ok(());
}

fn print_settings(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    return Ok(());
}

async fn print_quota() -> Result<()> {
    let now = Utc::now();
    let mut quota = QuotaTracker::load(StorageManager::get()).await;
    let remaining = quota.remaining(now).await;

    println!("Remaining messages: {remaining}/{}", quota.limit());
    if remaining == 0 {
        println!("Resets in {}", quota.countdown(now));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for FHome")
        .hide(true)
        .subcommand(
            Command::new("themes").about("List all supported code highlighting themes.")
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running FHome with environment variable RUST_LOG=fhome")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_conversation_id() -> Arg {
    return clap::Arg::new("conversation-id")
        .short('i')
        .long("id")
        .help("Conversation ID, as shown by `conversations list`.")
        .num_args(1);
}

fn subcommand_conversations_delete() -> Command {
    return Command::new("delete")
        .about("Delete one or all conversations.")
        .arg(arg_conversation_id())
        .arg(
            clap::Arg::new("all")
                .long("all")
                .help("Delete all conversations.")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("delete-args")
                .args(["conversation-id", "all"])
                .required(true),
        );
}

fn subcommand_conversations() -> Command {
    return Command::new("conversations")
        .about("Manage stored conversations.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the data directory path."))
        .subcommand(Command::new("list").about("List all conversations, newest first."))
        .subcommand(
            Command::new("export")
                .about("Export a conversation as a standalone HTML page. Defaults to the newest conversation.")
                .arg(arg_conversation_id())
                .arg(
                    clap::Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("File to write to instead of stdout.")
                        .num_args(1),
                ),
        )
        .subcommand(subcommand_conversations_delete());
}

fn subcommand_settings() -> Command {
    let text_arg = |id: &'static str, help: &'static str| {
        return Arg::new(id).long(id).num_args(1).help(help);
    };

    return Command::new("settings")
        .about("Show or change the user profile sent along with messages.")
        .arg_required_else_help(true)
        .subcommand(Command::new("show").about("Print the current settings as JSON."))
        .subcommand(
            Command::new("set")
                .about("Update one or more settings.")
                .arg(text_arg("name", "Display name shown on your messages."))
                .arg(text_arg("avatar", "Avatar image source for your messages."))
                .arg(
                    Arg::new("corner-radius")
                        .long("corner-radius")
                        .num_args(1)
                        .value_parser(value_parser!(u32))
                        .help("Message corner radius in pixels, used for HTML exports."),
                )
                .arg(text_arg("age", "Your age."))
                .arg(text_arg("hobby", "Your hobbies."))
                .arg(text_arg("bio", "A few words about you."))
                .arg(text_arg("preferences", "How you like answers to be written.")),
        );
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("FHOME_BACKEND")
        .num_args(1)
        .help(format!(
            "Payload shape sent to the completion proxy. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start the chat UI.")
        .arg(arg_backend());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:")
                || line.starts_with("MODES:")
                || line.starts_with("HOTKEYS:")
                || line.starts_with("CODE BLOCKS:")
            {
                return format!("CHAT {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let themes = Themes::list();

    return Command::new("fhome")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_conversations())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(Command::new("quota").about("Show how many messages are left today."))
        .subcommand(subcommand_settings())
        .arg(arg_backend())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FHOME_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::DataDir.to_string())
                .long(ConfigKey::DataDir.to_string())
                .env("FHOME_DATA_DIR")
                .num_args(1)
                .help(format!("Directory holding conversations, settings and the daily quota. [default: {}]", Config::default(ConfigKey::DataDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Endpoint.to_string())
                .long(ConfigKey::Endpoint.to_string())
                .env("FHOME_ENDPOINT")
                .num_args(1)
                .help(format!("URL of the completion proxy. [default: {}]", Config::default(ConfigKey::Endpoint)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("FHOME_THEME")
                .num_args(1)
                .help(format!("Sets code syntax highlighting theme. [default: {}]", Config::default(ConfigKey::Theme)))
                .value_parser(PossibleValuesParser::new(themes))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ThemeFile.to_string())
                .long(ConfigKey::ThemeFile.to_string())
                .env("FHOME_THEME_FILE")
                .num_args(1)
                .help(
                    "Absolute path to a TextMate tmTheme to use for code syntax highlighting."
                )
                .global(true),
        );
}

/// Parses the command line and runs one-shot commands. Returns true when the
/// chat UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("themes", _)) => {
                    println!("{}", Themes::list().join("\n"));
                }
                Some(("log-path", _)) => {
                    let log_path = cache_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("conversations", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;

            match subcmd_matches.subcommand() {
                Some(("dir", _)) => {
                    println!("{}", Config::get(ConfigKey::DataDir));
                }
                Some(("list", _)) => {
                    print_conversations_list().await?;
                }
                Some(("export", export_matches)) => {
                    export_conversation(export_matches).await?;
                }
                Some(("delete", delete_matches)) => {
                    delete_conversations(delete_matches).await?;
                }
                _ => {
                    subcommand_conversations().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("quota", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_quota().await?;
            return Ok(false);
        }
        Some(("settings", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;

            match subcmd_matches.subcommand() {
                Some(("show", _)) => {
                    print_settings(load_session().await.settings())?;
                }
                Some(("set", set_matches)) => {
                    set_settings(set_matches).await?;
                }
                _ => {
                    subcommand_settings().print_long_help()?;
                }
            }

            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
