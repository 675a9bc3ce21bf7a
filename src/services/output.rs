use crate::catalog::{CatalogError, IdentifierEntry, RegistryKeyEntry};
use crate::domain::constants::{EXIT_MALFORMED, EXIT_NOT_FOUND};
use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn entry_row(e: &IdentifierEntry) -> String {
    format!("{}\t{}\t{}", e.guid, e.kind, e.label)
}

pub fn registry_row(r: &RegistryKeyEntry) -> String {
    let name = if r.is_default() { "@" } else { r.value_name.as_str() };
    format!("{}\t{}\t{}", r.path, name, r.value_data)
}

fn error_kind(e: &anyhow::Error) -> &'static str {
    match e.downcast_ref::<CatalogError>() {
        Some(CatalogError::NotFound(_)) => "not_found",
        Some(CatalogError::MalformedGuid(_)) => "malformed_guid",
        Some(CatalogError::MalformedEntry { .. }) => "malformed_entry",
        Some(CatalogError::DanglingReference { .. }) => "dangling_reference",
        None => "error",
    }
}

/// `1` for lookups that came up empty, `2` for anything malformed or unreadable.
pub fn exit_code_for(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<CatalogError>() {
        Some(CatalogError::NotFound(_)) | Some(CatalogError::DanglingReference { .. }) => {
            EXIT_NOT_FOUND
        }
        _ => EXIT_MALFORMED,
    }
}

pub fn print_error(json: bool, e: &anyhow::Error) {
    if json {
        let out = JsonErr {
            ok: false,
            error: ErrorBody {
                kind: error_kind(e).to_string(),
                message: format!("{e:#}"),
            },
        };
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(_) => eprintln!("error: {e:#}"),
        }
    } else {
        eprintln!("error: {e:#}");
    }
}
