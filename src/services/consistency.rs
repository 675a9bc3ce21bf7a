use crate::catalog::Catalog;
use crate::domain::models::{BackReferenceFinding, CheckReport, DuplicateGuid, ValidationReport};

/// Audits the whole catalog. Findings are reported, never corrected.
pub fn check_catalog(catalog: &Catalog) -> CheckReport<'_> {
    let duplicates: Vec<DuplicateGuid> = catalog
        .duplicate_guids()
        .map(|(guid, entries)| DuplicateGuid { guid, entries })
        .collect();

    let mut progid_count = 0usize;
    let mut progids = Vec::new();
    for progid in catalog.progids() {
        progid_count += 1;
        let result = catalog.validate_progid_chain(progid);
        if let Some(err) = result.error(progid) {
            tracing::info!(%err, "progid finding");
            progids.push(ValidationReport {
                progid: progid.to_string(),
                result,
            });
        }
    }

    let mut back_references = Vec::new();
    for reference in catalog.back_references() {
        let result = catalog.validate_progid_chain(&reference.progid);
        let resolved_clsid = result.clsid();
        if resolved_clsid == Some(reference.clsid) {
            continue;
        }
        let status = match resolved_clsid {
            Some(_) => "mismatch",
            None => result.status(),
        };
        tracing::info!(clsid = %reference.clsid, progid = %reference.progid, status, "back reference finding");
        back_references.push(BackReferenceFinding {
            reference,
            status: status.to_string(),
            resolved_clsid,
        });
    }

    let clsid_conflicts = catalog.clsid_conflicts();
    for c in clsid_conflicts {
        tracing::info!(progid = %c.progid, line = c.ignored_line, "clsid conflict finding");
    }

    let overall = if duplicates.is_empty()
        && progids.is_empty()
        && clsid_conflicts.is_empty()
        && back_references.is_empty()
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    CheckReport {
        overall,
        identifier_count: catalog.identifiers().len(),
        registry_value_count: catalog.registry().len(),
        progid_count,
        duplicates,
        progids,
        clsid_conflicts,
        back_references,
    }
}
