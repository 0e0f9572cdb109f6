use crate::cli::{Commands, EntryCommand, UserCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::User { command } => match command {
            UserCommand::Register { json, .. }
            | UserCommand::Show { json, .. }
            | UserCommand::Settings { json, .. } => *json,
        },
        Commands::Entry { command } => match command {
            EntryCommand::List { json, .. }
            | EntryCommand::Add { json, .. }
            | EntryCommand::Clear { json, .. } => *json,
        },
        Commands::Parse { json, .. } | Commands::Invoice { json, .. } => *json,
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
