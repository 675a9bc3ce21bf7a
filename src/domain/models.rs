use crate::catalog::{
    ClassBackReference, ClsidConflict, IdentifierEntry, ProgIdValidation, RegistryKeyEntry,
};
use crate::guid::Guid;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// How a successfully executed command ended, for the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    Missing,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: ConfigGeneral,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigGeneral {
    /// Markdown resource to load; relative paths are taken from the config
    /// file's directory.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Serialize)]
pub struct LookupReport<'a> {
    pub query: String,
    pub entry: &'a IdentifierEntry,
    /// Other entries recorded under the same GUID.
    pub duplicates: Vec<&'a IdentifierEntry>,
}

#[derive(Serialize)]
pub struct ValidationReport<'a> {
    pub progid: String,
    #[serde(flatten)]
    pub result: ProgIdValidation<'a>,
}

#[derive(Serialize)]
pub struct DuplicateGuid<'a> {
    pub guid: Guid,
    pub entries: Vec<&'a IdentifierEntry>,
}

#[derive(Serialize)]
pub struct BackReferenceFinding<'a> {
    #[serde(flatten)]
    pub reference: &'a ClassBackReference,
    pub status: String,
    pub resolved_clsid: Option<Guid>,
}

#[derive(Serialize)]
pub struct CheckReport<'a> {
    pub overall: String,
    pub identifier_count: usize,
    pub registry_value_count: usize,
    pub progid_count: usize,
    pub duplicates: Vec<DuplicateGuid<'a>>,
    pub progids: Vec<ValidationReport<'a>>,
    pub clsid_conflicts: &'a [ClsidConflict],
    pub back_references: Vec<BackReferenceFinding<'a>>,
}

#[derive(Serialize)]
pub struct DumpReport<'a> {
    pub identifiers: &'a [IdentifierEntry],
    pub registry: &'a [RegistryKeyEntry],
}
