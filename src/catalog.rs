use crate::guid::Guid;
use crate::resource::{parse_resource, ResourceTables};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Class-root prefixes under which ProgIDs and class keys live.
const CLASS_ROOTS: &[&str] = &[
    "HKEY_CLASSES_ROOT\\",
    "HKCR\\",
    "HKEY_LOCAL_MACHINE\\SOFTWARE\\Classes\\",
    "HKLM\\SOFTWARE\\Classes\\",
];

/// First segments under a class root that are not ProgIDs.
const RESERVED_SEGMENTS: &[&str] = &["CLSID", "Interface", "TypeLib", "AppID"];

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("identifier not found: {0}")]
    NotFound(String),
    #[error("malformed GUID: {0}")]
    MalformedGuid(String),
    #[error("malformed entry at line {line}: {reason}")]
    MalformedEntry { line: usize, reason: String },
    #[error("{progid} references unknown CLSID {clsid}")]
    DanglingReference { progid: String, clsid: Guid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentifierKind {
    Clsid,
    Iid,
    Libid,
}

impl IdentifierKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "CLSID" => Some(IdentifierKind::Clsid),
            "IID" => Some(IdentifierKind::Iid),
            "LIBID" => Some(IdentifierKind::Libid),
            _ => None,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentifierKind::Clsid => "CLSID",
            IdentifierKind::Iid => "IID",
            IdentifierKind::Libid => "LIBID",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierEntry {
    pub guid: Guid,
    pub kind: IdentifierKind,
    pub label: String,
    /// 1-based line in the resource.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryKeyEntry {
    pub path: String,
    /// Empty for the key's default (`@`) value.
    pub value_name: String,
    pub value_data: String,
    pub line: usize,
}

impl RegistryKeyEntry {
    pub fn is_default(&self) -> bool {
        self.value_name.is_empty()
    }
}

/// A ProgID key and the two values that matter for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProgIdKey {
    name: String,
    clsid: Option<(Guid, usize)>,
    cur_ver: Option<String>,
}

/// A ProgID whose `CLSID` value is set more than once with different GUIDs.
/// The first value stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClsidConflict {
    pub progid: String,
    pub clsid: Guid,
    pub line: usize,
    pub ignored_clsid: Guid,
    pub ignored_line: usize,
}

/// `CLSID\{g}\ProgID` or `CLSID\{g}\VersionIndependentProgID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBackReference {
    pub clsid: Guid,
    pub value_key: String,
    pub progid: String,
    pub line: usize,
}

/// Outcome of following a ProgID to its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgIdValidation<'a> {
    Resolved {
        chain: Vec<String>,
        clsid: Guid,
        entry: &'a IdentifierEntry,
    },
    Unresolved {
        chain: Vec<String>,
        missing: String,
    },
    DanglingClsid {
        chain: Vec<String>,
        clsid: Guid,
    },
    /// The GUID is known, but never as a CLSID.
    NotAClass {
        chain: Vec<String>,
        clsid: Guid,
        entries: Vec<&'a IdentifierEntry>,
    },
    CurVerCycle {
        chain: Vec<String>,
    },
}

impl<'a> ProgIdValidation<'a> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ProgIdValidation::Resolved { .. })
    }

    pub fn chain(&self) -> &[String] {
        match self {
            ProgIdValidation::Resolved { chain, .. }
            | ProgIdValidation::Unresolved { chain, .. }
            | ProgIdValidation::DanglingClsid { chain, .. }
            | ProgIdValidation::NotAClass { chain, .. }
            | ProgIdValidation::CurVerCycle { chain } => chain,
        }
    }

    pub fn clsid(&self) -> Option<Guid> {
        match self {
            ProgIdValidation::Resolved { clsid, .. }
            | ProgIdValidation::DanglingClsid { clsid, .. }
            | ProgIdValidation::NotAClass { clsid, .. } => Some(*clsid),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ProgIdValidation::Resolved { .. } => "resolved",
            ProgIdValidation::Unresolved { .. } => "unresolved",
            ProgIdValidation::DanglingClsid { .. } => "dangling_clsid",
            ProgIdValidation::NotAClass { .. } => "not_a_class",
            ProgIdValidation::CurVerCycle { .. } => "cur_ver_cycle",
        }
    }

    /// The error a caller should surface, if any.
    pub fn error(&self, progid: &str) -> Option<CatalogError> {
        match self {
            ProgIdValidation::Resolved { .. } => None,
            ProgIdValidation::Unresolved { missing, .. } => {
                Some(CatalogError::NotFound(missing.clone()))
            }
            ProgIdValidation::DanglingClsid { clsid, .. } => Some(CatalogError::DanglingReference {
                progid: progid.to_string(),
                clsid: *clsid,
            }),
            ProgIdValidation::NotAClass { clsid, .. } => Some(CatalogError::DanglingReference {
                progid: progid.to_string(),
                clsid: *clsid,
            }),
            ProgIdValidation::CurVerCycle { chain } => Some(CatalogError::NotFound(format!(
                "CurVer cycle: {}",
                chain.join(" -> ")
            ))),
        }
    }
}

/// Lazy, case-insensitive label search over the identifier table.
///
/// Cloning forks the remaining sequence. Call [`Catalog::lookup_by_label`]
/// again to start over.
#[derive(Debug, Clone)]
pub struct LabelMatches<'a> {
    entries: std::slice::Iter<'a, IdentifierEntry>,
    needle: String,
}

impl<'a> Iterator for LabelMatches<'a> {
    type Item = &'a IdentifierEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = self.needle.as_str();
        self.entries.find(|e| e.label.to_lowercase().contains(needle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

impl std::iter::FusedIterator for LabelMatches<'_> {}

/// The immutable identifier and registry tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    identifiers: Vec<IdentifierEntry>,
    registry: Vec<RegistryKeyEntry>,
    #[serde(skip)]
    by_guid: BTreeMap<Guid, Vec<usize>>,
    #[serde(skip)]
    progids: Vec<ProgIdKey>,
    #[serde(skip)]
    progid_index: BTreeMap<String, usize>,
    #[serde(skip)]
    back_references: Vec<ClassBackReference>,
    #[serde(skip)]
    clsid_conflicts: Vec<ClsidConflict>,
}

impl Catalog {
    /// Parses and indexes a resource. With `strict`, a duplicated GUID is a
    /// load error instead of a reported finding.
    pub fn load(text: &str, strict: bool) -> Result<Self, CatalogError> {
        let tables = parse_resource(text)?;
        let catalog = Catalog::from_tables(tables)?;
        if strict {
            if let Some((guid, entries)) = catalog.duplicate_guids().next() {
                return Err(CatalogError::MalformedEntry {
                    line: entries[1].line,
                    reason: format!(
                        "duplicate GUID {} (first defined at line {})",
                        guid, entries[0].line
                    ),
                });
            }
            if let Some(c) = catalog.clsid_conflicts.first() {
                return Err(CatalogError::MalformedEntry {
                    line: c.ignored_line,
                    reason: format!(
                        "conflicting CLSID for {}: {} (line {}) vs {}",
                        c.progid, c.clsid, c.line, c.ignored_clsid
                    ),
                });
            }
        }
        tracing::debug!(
            identifiers = catalog.identifiers.len(),
            registry_values = catalog.registry.len(),
            progids = catalog.progids.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_tables(tables: ResourceTables) -> Result<Self, CatalogError> {
        let ResourceTables {
            identifiers,
            registry,
        } = tables;

        let mut by_guid: BTreeMap<Guid, Vec<usize>> = BTreeMap::new();
        for (i, e) in identifiers.iter().enumerate() {
            by_guid.entry(e.guid).or_default().push(i);
        }

        let mut progids: Vec<ProgIdKey> = Vec::new();
        let mut progid_index: BTreeMap<String, usize> = BTreeMap::new();
        let mut back_references = Vec::new();
        let mut clsid_conflicts = Vec::new();

        for value in &registry {
            let Some(relative) = class_relative(&value.path) else {
                continue;
            };
            let segments: Vec<&str> = relative.split('\\').collect();
            let first = segments[0];

            if first.eq_ignore_ascii_case("CLSID") {
                if segments.len() == 3 && value.is_default() {
                    let sub = segments[2];
                    if sub.eq_ignore_ascii_case("ProgID")
                        || sub.eq_ignore_ascii_case("VersionIndependentProgID")
                    {
                        let clsid = Guid::parse(segments[1]).map_err(|_| {
                            CatalogError::MalformedEntry {
                                line: value.line,
                                reason: format!("class key is not a GUID: {}", segments[1]),
                            }
                        })?;
                        back_references.push(ClassBackReference {
                            clsid,
                            value_key: sub.to_string(),
                            progid: value.value_data.clone(),
                            line: value.line,
                        });
                    }
                }
                continue;
            }
            // `.ext` keys are file associations, not ProgIDs
            if first.is_empty()
                || first.starts_with('.')
                || RESERVED_SEGMENTS
                    .iter()
                    .any(|r| first.eq_ignore_ascii_case(r))
            {
                continue;
            }

            let key = first.to_ascii_lowercase();
            let idx = *progid_index.entry(key).or_insert_with(|| {
                progids.push(ProgIdKey {
                    name: first.to_string(),
                    clsid: None,
                    cur_ver: None,
                });
                progids.len() - 1
            });

            if segments.len() != 2 || !value.is_default() {
                continue;
            }
            let sub = segments[1];
            if sub.eq_ignore_ascii_case("CLSID") {
                let clsid = Guid::parse(&value.value_data).map_err(|_| {
                    CatalogError::MalformedEntry {
                        line: value.line,
                        reason: format!(
                            "CLSID value of {} is not a GUID: {}",
                            first, value.value_data
                        ),
                    }
                })?;
                let existing = progids[idx].clsid;
                match existing {
                    None => progids[idx].clsid = Some((clsid, value.line)),
                    Some((kept, line)) if kept != clsid => {
                        tracing::debug!(
                            progid = first,
                            %kept,
                            ignored = %clsid,
                            "conflicting CLSID values"
                        );
                        clsid_conflicts.push(ClsidConflict {
                            progid: progids[idx].name.clone(),
                            clsid: kept,
                            line,
                            ignored_clsid: clsid,
                            ignored_line: value.line,
                        });
                    }
                    Some(_) => {}
                }
            } else if sub.eq_ignore_ascii_case("CurVer") {
                progids[idx].cur_ver = Some(value.value_data.trim().to_string());
            }
        }

        Ok(Catalog {
            identifiers,
            registry,
            by_guid,
            progids,
            progid_index,
            back_references,
            clsid_conflicts,
        })
    }

    pub fn identifiers(&self) -> &[IdentifierEntry] {
        &self.identifiers
    }

    pub fn registry(&self) -> &[RegistryKeyEntry] {
        &self.registry
    }

    pub fn back_references(&self) -> &[ClassBackReference] {
        &self.back_references
    }

    pub fn clsid_conflicts(&self) -> &[ClsidConflict] {
        &self.clsid_conflicts
    }

    /// ProgID names in first-appearance order.
    pub fn progids(&self) -> impl Iterator<Item = &str> + '_ {
        self.progids.iter().map(|p| p.name.as_str())
    }

    pub fn get(&self, guid: &Guid) -> Option<&IdentifierEntry> {
        self.lookup_all(guid).next()
    }

    /// Every entry recorded under `guid`, in source order.
    pub fn lookup_all<'a>(&'a self, guid: &Guid) -> impl Iterator<Item = &'a IdentifierEntry> + 'a {
        self.by_guid
            .get(guid)
            .into_iter()
            .flatten()
            .map(move |&i| &self.identifiers[i])
    }

    /// Exact GUID lookup. Braces are optional and hex case is ignored. A GUID
    /// recorded more than once yields its first entry.
    pub fn lookup_by_guid(&self, raw: &str) -> Result<&IdentifierEntry, CatalogError> {
        let guid = Guid::parse(raw)?;
        self.get(&guid)
            .ok_or_else(|| CatalogError::NotFound(guid.to_string()))
    }

    pub fn lookup_by_guid_kind(
        &self,
        raw: &str,
        kind: IdentifierKind,
    ) -> Result<&IdentifierEntry, CatalogError> {
        let guid = Guid::parse(raw)?;
        self.lookup_all(&guid)
            .find(|e| e.kind == kind)
            .ok_or_else(|| CatalogError::NotFound(format!("{kind} {guid}")))
    }

    pub fn lookup_by_label(&self, substring: &str) -> LabelMatches<'_> {
        LabelMatches {
            entries: self.identifiers.iter(),
            needle: substring.to_lowercase(),
        }
    }

    /// GUIDs recorded more than once, each with all of its entries.
    pub fn duplicate_guids(&self) -> impl Iterator<Item = (Guid, Vec<&IdentifierEntry>)> + '_ {
        self.by_guid
            .iter()
            .filter(|(_, idx)| idx.len() > 1)
            .map(move |(g, idx)| (*g, idx.iter().map(|&i| &self.identifiers[i]).collect()))
    }

    fn progid(&self, name: &str) -> Option<&ProgIdKey> {
        self.progid_index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.progids[i])
    }

    /// Resolves `progid` to its class, following `CurVer` when the key has no
    /// `CLSID` of its own.
    pub fn validate_progid_chain(&self, progid: &str) -> ProgIdValidation<'_> {
        let mut chain: Vec<String> = Vec::new();
        let mut current = progid.trim().to_string();

        loop {
            if chain.iter().any(|p| p.eq_ignore_ascii_case(&current)) {
                chain.push(current);
                return ProgIdValidation::CurVerCycle { chain };
            }
            let Some(key) = self.progid(&current) else {
                chain.push(current.clone());
                return ProgIdValidation::Unresolved {
                    chain,
                    missing: current,
                };
            };
            chain.push(key.name.clone());

            if let Some((clsid, _)) = key.clsid {
                return self.classify(chain, clsid);
            }
            match &key.cur_ver {
                Some(next) => current = next.clone(),
                None => {
                    return ProgIdValidation::Unresolved {
                        missing: format!("{}\\CLSID", key.name),
                        chain,
                    }
                }
            }
        }
    }

    fn classify(&self, chain: Vec<String>, clsid: Guid) -> ProgIdValidation<'_> {
        let entries: Vec<&IdentifierEntry> = self.lookup_all(&clsid).collect();
        if let Some(entry) = entries
            .iter()
            .copied()
            .find(|e| e.kind == IdentifierKind::Clsid)
        {
            return ProgIdValidation::Resolved {
                chain,
                clsid,
                entry,
            };
        }
        if entries.is_empty() {
            ProgIdValidation::DanglingClsid { chain, clsid }
        } else {
            ProgIdValidation::NotAClass {
                chain,
                clsid,
                entries,
            }
        }
    }
}

/// Strips a class root, case-insensitively.
fn class_relative(path: &str) -> Option<&str> {
    CLASS_ROOTS.iter().find_map(|root| {
        let head = path.get(..root.len())?;
        head.eq_ignore_ascii_case(root).then(|| &path[root.len()..])
    })
}
