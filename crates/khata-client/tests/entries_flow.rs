use std::fs;

use khata_client::commands::entries::{
    EntriesAddOptions, EntriesClearOptions, EntriesListOptions, add_with_options,
    clear_with_options, list_with_options,
};
use khata_client::commands::user::{UserOptions, show_with_options};
use serde_json::json;
use tempfile::tempdir;

const MOBILE: &str = "9876543210";

#[test]
fn add_from_stdin_skips_zero_revenue_and_lists_newest_first() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let body = json!([
            {"product": "maggi", "units": 2, "revenue": 24, "date": "2026-01-02T08:00:00.000Z"},
            {"product": "free sample", "units": 1, "revenue": 0},
            {"product": "rent", "units": 0, "revenue": -5000, "credit": true, "creditor": "Landlord", "date": "2026-01-03T08:00:00.000Z"},
            {"revenue": 1000, "creditor": "Ramesh", "date": "2026-01-01T08:00:00.000Z"}
        ])
        .to_string();

        let added = add_with_options(EntriesAddOptions {
            mobile: MOBILE.to_string(),
            path: Some("-".to_string()),
            home_override: Some(&home),
            stdin_override: Some(body),
        });
        assert!(added.is_ok());
        if let Ok(envelope) = added {
            assert_eq!(envelope.command, "entry add");
            assert_eq!(envelope.data["source_used"], json!("stdin"));
            assert_eq!(
                envelope.data["summary"],
                json!({"rows_read": 4, "inserted": 3, "skipped_zero_revenue": 1})
            );
        }

        let listed = list_with_options(EntriesListOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(listed.is_ok());
        if let Ok(envelope) = listed {
            let rows = envelope.data["rows"].as_array().cloned().unwrap_or_default();
            let products = rows
                .iter()
                .map(|row| row["product"].clone())
                .collect::<Vec<_>>();
            assert_eq!(products, vec![json!("rent"), json!("maggi"), json!(null)]);
            assert_eq!(rows[0]["credit"], json!(true));
            assert_eq!(
                envelope.data["summary"],
                json!({
                    "entry_count": 3,
                    "inflow_total": 1024,
                    "outflow_total": -5000,
                    "net_total": -3976,
                    "latest_date": "2026-01-03T08:00:00.000Z"
                })
            );
        }

        let placeholder = show_with_options(UserOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(placeholder.is_ok());
        if let Ok(envelope) = placeholder {
            assert_eq!(envelope.data["name"], json!(format!("User {MOBILE}")));
        }
    }
}

#[test]
fn add_from_csv_file_maps_credit_flags() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        let csv_path = temp_dir.path().join("entries.csv");
        let write = fs::write(
            &csv_path,
            "product,units,revenue,credit,creditor\n500 gm haldi masala,1,250,true,Suresh\nsugar,2,90.9,false,\n",
        );
        assert!(write.is_ok());

        let added = add_with_options(EntriesAddOptions {
            mobile: MOBILE.to_string(),
            path: Some(csv_path.display().to_string()),
            home_override: Some(&home),
            stdin_override: None,
        });
        assert!(added.is_ok());
        if let Ok(envelope) = added {
            assert_eq!(envelope.data["source_used"], json!("file"));
            assert_eq!(envelope.data["summary"]["inserted"], json!(2));
        }

        let listed = list_with_options(EntriesListOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(listed.is_ok());
        if let Ok(envelope) = listed {
            let rows = envelope.data["rows"].as_array().cloned().unwrap_or_default();
            let suresh = rows.iter().find(|row| row["creditor"] == json!("Suresh"));
            assert!(suresh.is_some());
            if let Some(row) = suresh {
                assert_eq!(row["credit"], json!(true));
                assert_eq!(row["revenue"], json!(250));
            }
            let sugar = rows.iter().find(|row| row["product"] == json!("sugar"));
            assert!(sugar.is_some());
            if let Some(row) = sugar {
                assert_eq!(row["credit"], json!(false));
                assert_eq!(row["revenue"], json!(90));
                assert_eq!(row["creditor"], json!(null));
            }
        }
    }
}

#[test]
fn add_with_only_zero_revenue_writes_nothing() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");

        let added = add_with_options(EntriesAddOptions {
            mobile: MOBILE.to_string(),
            path: None,
            home_override: Some(&home),
            stdin_override: Some(r#"{"items":[{"product":"x","revenue":0}]}"#.to_string()),
        });
        assert!(added.is_err());
        if let Err(error) = added {
            assert_eq!(error.code, "no_valid_entries");
        }

        let listed = list_with_options(EntriesListOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(listed.is_ok());
        if let Ok(envelope) = listed {
            assert_eq!(envelope.data["summary"]["entry_count"], json!(0));
            assert_eq!(envelope.data["summary"]["latest_date"], json!(null));
        }
    }
}

#[test]
fn clear_removes_only_that_mobiles_entries() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        for mobile in [MOBILE, "9000000001"] {
            let added = add_with_options(EntriesAddOptions {
                mobile: mobile.to_string(),
                path: Some("-".to_string()),
                home_override: Some(&home),
                stdin_override: Some(r#"[{"revenue": 10}, {"revenue": 20}]"#.to_string()),
            });
            assert!(added.is_ok());
        }

        let cleared = clear_with_options(EntriesClearOptions {
            mobile: MOBILE.to_string(),
            home_override: Some(&home),
        });
        assert!(cleared.is_ok());
        if let Ok(envelope) = cleared {
            assert_eq!(envelope.data, json!({"mobile": MOBILE, "deleted": 2}));
        }

        let other = list_with_options(EntriesListOptions {
            mobile: "9000000001".to_string(),
            home_override: Some(&home),
        });
        assert!(other.is_ok());
        if let Ok(envelope) = other {
            assert_eq!(envelope.data["summary"]["entry_count"], json!(2));
        }
    }
}

#[test]
fn malformed_payloads_are_rejected_before_touching_the_ledger() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("ledger-home");
        for (body, code) in [
            ("[{\"revenue\": 10", "invalid_argument"),
            ("product,units\nmaggi,2\n", "entries_schema_mismatch"),
            ("ramesh paid 1000", "invalid_argument"),
        ] {
            let added = add_with_options(EntriesAddOptions {
                mobile: MOBILE.to_string(),
                path: Some("-".to_string()),
                home_override: Some(&home),
                stdin_override: Some(body.to_string()),
            });
            assert_eq!(added.err().map(|error| error.code), Some(code.to_string()), "{body}");
        }
        assert!(!home.join("ledger.db").exists());
    }
}
