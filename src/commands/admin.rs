use crate::*;

pub fn handle_admin_commands(cli: &Cli, catalog: &Catalog) -> anyhow::Result<Option<Outcome>> {
    match &cli.command {
        Commands::Check => {
            let report = check_catalog(catalog);
            let ok = report.overall == "ok";
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok,
                        data: &report
                    })?
                );
            } else {
                println!("check: {}", report.overall);
                for d in &report.duplicates {
                    let entries: Vec<String> = d
                        .entries
                        .iter()
                        .map(|e| format!("{} {} (line {})", e.kind, e.label, e.line))
                        .collect();
                    println!("duplicate\t{}\t{}", d.guid, entries.join(", "));
                }
                for p in &report.progids {
                    let clsid = p
                        .result
                        .clsid()
                        .map(|g| g.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("progid\t{}\t{}\t{}", p.progid, p.result.status(), clsid);
                }
                for c in report.clsid_conflicts {
                    println!(
                        "clsid_conflict\t{}\t{} (line {})\t{} (line {})",
                        c.progid, c.clsid, c.line, c.ignored_clsid, c.ignored_line
                    );
                }
                for b in &report.back_references {
                    println!(
                        "back_reference\t{}\t{}\t{}\t{}",
                        b.reference.clsid, b.reference.value_key, b.reference.progid, b.status
                    );
                }
            }
            Ok(Some(if ok { Outcome::Found } else { Outcome::Missing }))
        }
        Commands::Dump => {
            let report = DumpReport {
                identifiers: catalog.identifiers(),
                registry: catalog.registry(),
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                for e in report.identifiers {
                    println!("{}", entry_row(e));
                }
                for r in report.registry {
                    println!("{}", registry_row(r));
                }
            }
            Ok(Some(Outcome::Found))
        }
        _ => Ok(None),
    }
}
