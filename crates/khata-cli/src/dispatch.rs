use khata_client::commands;
use khata_client::contracts::types::StoreSettings;
use khata_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, EntryCommand, StoreArgs, UserCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::User { command } => match command {
            UserCommand::Register { mobile, name, .. } => {
                commands::user::register(mobile.clone(), name.clone())
            }
            UserCommand::Show { mobile, .. } => commands::user::show(mobile.clone()),
            UserCommand::Settings { mobile, store, .. } => {
                commands::user::settings(mobile.clone(), store_updates(store))
            }
        },
        Commands::Entry { command } => match command {
            EntryCommand::List { mobile, .. } => commands::entries::list(mobile.clone()),
            EntryCommand::Add { mobile, path, .. } => {
                commands::entries::add(mobile.clone(), path.clone())
            }
            EntryCommand::Clear { mobile, .. } => commands::entries::clear(mobile.clone()),
        },
        Commands::Parse { message, save, .. } => {
            commands::parse::run(message.join(" "), save.clone())
        }
        Commands::Invoice { path, mobile, .. } => {
            commands::invoice::run(path.clone(), mobile.clone())
        }
    }
}

fn store_updates(store: &StoreArgs) -> StoreSettings {
    StoreSettings {
        store_name: store.store_name.clone(),
        store_address: store.store_address.clone(),
        store_gst: store.store_gst.clone(),
        store_contact: store.store_contact.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::{dispatch, store_updates};
    use crate::cli::{Commands, UserCommand};

    #[test]
    fn store_flags_map_to_partial_updates() {
        let parsed = parse_from([
            "khata",
            "user",
            "settings",
            "9876543210",
            "--store-address",
            "MG Road",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed
            && let Commands::User {
                command: UserCommand::Settings { store, .. },
            } = &cli.command
        {
            let updates = store_updates(store);
            assert_eq!(updates.store_address.as_deref(), Some("MG Road"));
            assert!(updates.store_name.is_none());
        }
    }

    #[test]
    fn offline_parse_dispatches_without_a_ledger() {
        let parsed = parse_from(["khata", "parse", "ramesh", "paid", "1000"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_ok());
            if let Ok(success) = response {
                assert_eq!(success.command, "parse");
                assert_eq!(success.data["items"][0]["creditor"], "Ramesh");
            }
        }
    }
}
