use crate::*;

pub fn handle_runtime_commands(cli: &Cli, catalog: &Catalog) -> anyhow::Result<Outcome> {
    match &cli.command {
        Commands::Lookup { guid, kind } => {
            let entry = match kind {
                Some(k) => catalog.lookup_by_guid_kind(guid, *k)?,
                None => catalog.lookup_by_guid(guid)?,
            };
            let duplicates: Vec<&IdentifierEntry> = catalog
                .lookup_all(&entry.guid)
                .filter(|e| *e != entry)
                .collect();
            tracing::debug!(guid = %entry.guid, duplicates = duplicates.len(), "lookup hit");
            let report = LookupReport {
                query: guid.clone(),
                entry,
                duplicates,
            };
            print_one(cli.json, report, |r| {
                let mut lines = vec![entry_row(r.entry)];
                lines.extend(r.duplicates.iter().map(|d| format!("also\t{}", entry_row(d))));
                lines.join("\n")
            })?;
        }
        Commands::Find { substring, kind } => {
            let items: Vec<&IdentifierEntry> = catalog
                .lookup_by_label(substring)
                .filter(|e| kind.map(|k| e.kind == k).unwrap_or(true))
                .collect();
            if items.is_empty() {
                return Err(CatalogError::NotFound(format!(
                    "no identifier label contains '{}'",
                    substring
                ))
                .into());
            }
            print_out(cli.json, &items, |e| entry_row(e))?;
        }
        Commands::List { kind } => {
            let items: Vec<&IdentifierEntry> = catalog
                .identifiers()
                .iter()
                .filter(|e| kind.map(|k| e.kind == k).unwrap_or(true))
                .collect();
            print_out(cli.json, &items, |e| entry_row(e))?;
        }
        Commands::Validate { progid } => {
            let result = catalog.validate_progid_chain(progid);
            let resolved = result.is_resolved();
            let err = result.error(progid);
            if let Some(e) = &err {
                tracing::info!(%e, "validation failed");
            }
            let report = ValidationReport {
                progid: progid.clone(),
                result,
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: resolved,
                        data: &report
                    })?
                );
            } else {
                let clsid = report
                    .result
                    .clsid()
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}", report.progid, report.result.status(), clsid);
                println!("chain: {}", report.result.chain().join(" -> "));
                if let ProgIdValidation::Resolved { entry, .. } = &report.result {
                    println!("class: {}", entry.label);
                }
                if let Some(e) = err {
                    println!("error: {}", e);
                }
            }
            if !resolved {
                return Ok(Outcome::Missing);
            }
        }
        Commands::Check | Commands::Dump => {}
    }

    Ok(Outcome::Found)
}
