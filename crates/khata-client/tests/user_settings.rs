use khata_client::commands::user::{
    RegisterOptions, SettingsOptions, UserOptions, register_with_options, settings_with_options,
    show_with_options,
};
use khata_client::contracts::types::StoreSettings;
use serde_json::json;
use tempfile::tempdir;

const MOBILE: &str = "9876543210";

#[test]
fn register_again_renames_and_keeps_store_settings() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let registered = register_with_options(RegisterOptions {
            mobile: MOBILE.to_string(),
            name: "Ramesh".to_string(),
            home_override: Some(&home),
        });
        assert!(registered.is_ok());

        let saved = settings_with_options(SettingsOptions {
            mobile: MOBILE.to_string(),
            updates: StoreSettings {
                store_name: Some("Ramesh Kirana Store".to_string()),
                store_gst: Some("29ABCDE1234F1Z5".to_string()),
                ..StoreSettings::default()
            },
            home_override: Some(&home),
        });
        assert!(saved.is_ok());

        let renamed = register_with_options(RegisterOptions {
            mobile: MOBILE.to_string(),
            name: "Ramesh Kirana".to_string(),
            home_override: Some(&home),
        });
        assert!(renamed.is_ok());

        let shown = show_with_options(UserOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(shown.is_ok());
        if let Ok(envelope) = shown {
            assert_eq!(envelope.command, "user show");
            assert_eq!(
                envelope.data,
                json!({
                    "mobile": MOBILE,
                    "name": "Ramesh Kirana",
                    "store_name": "Ramesh Kirana Store",
                    "store_address": null,
                    "store_gst": "29ABCDE1234F1Z5",
                    "store_contact": null
                })
            );
        }
    }
}

#[test]
fn show_unknown_user_is_user_not_found() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let shown = show_with_options(UserOptions {
            mobile: "1111111111".to_string(),
            home_override: Some(&home),
        });
        assert!(shown.is_err());
        if let Err(error) = shown {
            assert_eq!(error.code, "user_not_found");
            assert!(error.recovery_steps[0].contains("khata user register 1111111111"));
        }
    }
}

#[test]
fn register_requires_a_name() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let registered = register_with_options(RegisterOptions {
            mobile: MOBILE.to_string(),
            name: "   ".to_string(),
            home_override: Some(&home),
        });
        assert_eq!(
            registered.err().map(|error| error.code),
            Some("invalid_argument".to_string())
        );
    }
}

#[test]
fn settings_update_only_touches_provided_keys() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let first = settings_with_options(SettingsOptions {
            mobile: MOBILE.to_string(),
            updates: StoreSettings {
                store_name: Some("Sharma General Store".to_string()),
                store_gst: Some("29ABCDE1234F1Z5".to_string()),
                ..StoreSettings::default()
            },
            home_override: Some(&home),
        });
        assert!(first.is_ok());
        if let Ok(envelope) = first {
            assert_eq!(envelope.data["updated"], json!(["store_name", "store_gst"]));
        }

        let second = settings_with_options(SettingsOptions {
            mobile: MOBILE.to_string(),
            updates: StoreSettings {
                store_contact: Some("+91 98765 43210".to_string()),
                ..StoreSettings::default()
            },
            home_override: Some(&home),
        });
        assert!(second.is_ok());

        let shown = settings_with_options(SettingsOptions {
            mobile: MOBILE.to_string(),
            updates: StoreSettings::default(),
            home_override: Some(&home),
        });
        assert!(shown.is_ok());
        if let Ok(envelope) = shown {
            assert_eq!(envelope.data["updated"], json!([]));
            assert_eq!(
                envelope.data["settings"],
                json!({
                    "store_name": "Sharma General Store",
                    "store_address": null,
                    "store_gst": "29ABCDE1234F1Z5",
                    "store_contact": "+91 98765 43210"
                })
            );
        }

        let user = show_with_options(UserOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(user.is_ok());
        if let Ok(envelope) = user {
            assert_eq!(envelope.data["name"], json!(format!("User {MOBILE}")));
        }
    }
}

#[test]
fn reading_settings_of_unknown_user_fails() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let shown = settings_with_options(SettingsOptions {
            mobile: MOBILE.to_string(),
            updates: StoreSettings::default(),
            home_override: Some(&home),
        });
        assert_eq!(
            shown.err().map(|error| error.code),
            Some("user_not_found".to_string())
        );
    }
}
