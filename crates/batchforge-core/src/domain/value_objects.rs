//! Domain value objects: step/record/reader/processor kinds, template
//! identifiers, project coordinates and isolation keys.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. The
//! kinds carry their wire spelling (the names front-ends send) through serde;
//! open-ended kinds such as readers keep unknown values verbatim so templates
//! can still see them.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire name of the reader kind that needs a row mapper.
pub const PAGING_READER: &str = "JdbcPagingItemReader";

/// Wire name of the processor kind that needs an object mapper.
pub const STRUCT_MAPPER: &str = "MapStructItemProcessor";

// ── StepKind ─────────────────────────────────────────────────────────────────

/// Whether a step is a chunk-oriented step or a plain unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    #[serde(alias = "step")]
    Step,
    #[serde(alias = "tasklet")]
    Tasklet,
}

impl StepKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Step => "STEP",
            Self::Tasklet => "TASKLET",
        }
    }

    /// Tasklets never generate record, row-mapper or object-mapper files.
    pub const fn generates_records(self) -> bool {
        matches!(self, Self::Step)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RecordShape ──────────────────────────────────────────────────────────────

/// Structural style of a generated data-transfer type.
///
/// `Record` is an immutable value type, `Class` a conventional mutable bean.
/// Anything that is not explicitly a record is rendered as a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    #[serde(alias = "RECORD")]
    Record,
    #[default]
    #[serde(alias = "CLASS")]
    Class,
}

impl RecordShape {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Class => "class",
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ReaderKind ───────────────────────────────────────────────────────────────

/// Item reader implementation selected for a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReaderKind {
    /// `JdbcPagingItemReader`: rows are mapped through a generated row mapper.
    Paging,
    Other(String),
}

impl ReaderKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paging => PAGING_READER,
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ReaderKind {
    fn from(value: String) -> Self {
        if value == PAGING_READER {
            Self::Paging
        } else {
            Self::Other(value)
        }
    }
}

impl From<ReaderKind> for String {
    fn from(kind: ReaderKind) -> Self {
        match kind {
            ReaderKind::Paging => PAGING_READER.to_string(),
            ReaderKind::Other(name) => name,
        }
    }
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProcessorKind ────────────────────────────────────────────────────────────

/// Item processor implementation selected for a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessorKind {
    /// `MapStructItemProcessor`: mapping rules become a generated object mapper.
    StructMapper,
    Other(String),
}

impl ProcessorKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StructMapper => STRUCT_MAPPER,
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ProcessorKind {
    fn from(value: String) -> Self {
        if value == STRUCT_MAPPER {
            Self::StructMapper
        } else {
            Self::Other(value)
        }
    }
}

impl From<ProcessorKind> for String {
    fn from(kind: ProcessorKind) -> Self {
        match kind {
            ProcessorKind::StructMapper => STRUCT_MAPPER.to_string(),
            ProcessorKind::Other(name) => name,
        }
    }
}

impl fmt::Display for ProcessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TemplateId ───────────────────────────────────────────────────────────────

/// Closed set of templates the generator knows how to render.
///
/// Every identifier maps to exactly one template file name; renderers and
/// override directories are keyed by that name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    StepClass,
    TaskletClass,
    RecordIo,
    ClassIo,
    RecordRowMapper,
    ClassRowMapper,
    ObjectMapper,
}

impl TemplateId {
    pub const ALL: [TemplateId; 7] = [
        Self::StepClass,
        Self::TaskletClass,
        Self::RecordIo,
        Self::ClassIo,
        Self::RecordRowMapper,
        Self::ClassRowMapper,
        Self::ObjectMapper,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StepClass => "step-class",
            Self::TaskletClass => "tasklet-class",
            Self::RecordIo => "record-io",
            Self::ClassIo => "class-io",
            Self::RecordRowMapper => "record-row-mapper",
            Self::ClassRowMapper => "class-row-mapper",
            Self::ObjectMapper => "object-mapper",
        }
    }

    /// Template file backing this identifier.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::StepClass => "StepSteplet.java.hbs",
            Self::TaskletClass => "Tasklet.java.hbs",
            Self::RecordIo => "IORecord.java.hbs",
            Self::ClassIo => "IOClass.java.hbs",
            Self::RecordRowMapper => "RowMapperRecord.java.hbs",
            Self::ClassRowMapper => "RowMapperClass.java.hbs",
            Self::ObjectMapper => "MapStructMapper.java.hbs",
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.file_name() == file_name)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(needle) || id.file_name() == needle)
            .ok_or_else(|| DomainError::UnknownTemplate(needle.to_string()))
    }
}

// ── ProjectCoordinates ───────────────────────────────────────────────────────

/// Build coordinates handed to the external scaffold generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub package: String,
}

// ── IsolationKey ─────────────────────────────────────────────────────────────

/// Per-request unique key naming the transient working directory.
///
/// `archive_token` is the uniqueness suffix used in the archive file name.
/// Both parts must be single, safe path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsolationKey {
    key: String,
    archive_token: String,
}

impl IsolationKey {
    pub fn new(
        key: impl Into<String>,
        archive_token: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let key = key.into();
        let archive_token = archive_token.into();
        crate::domain::entities::common::ensure_safe_segment(&key, "isolation key")?;
        crate::domain::entities::common::ensure_safe_segment(&archive_token, "archive token")?;
        Ok(Self { key, archive_token })
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn archive_token(&self) -> &str {
        &self.archive_token
    }
}

impl fmt::Display for IsolationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
