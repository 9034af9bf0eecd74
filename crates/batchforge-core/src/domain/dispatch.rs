//! Template resolution.
//!
//! Maps each artifact a step can produce onto the single template that
//! renders it. Resolution is pure and total over the closed set of roles;
//! `None` means "this artifact is not generated".

use crate::domain::entities::batch::{ReaderSpec, RecordSpec};
use crate::domain::value_objects::{ProcessorKind, ReaderKind, RecordShape, StepKind, TemplateId};

/// The kind of source file being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole<'a> {
    /// The step (or tasklet) class itself.
    StepClass(StepKind),
    /// An input or output record type.
    Record(RecordShape),
    /// A row mapper feeding the input record from the reader.
    RowMapper {
        reader: &'a ReaderKind,
        input: RecordShape,
    },
    ObjectMapper(&'a ProcessorKind),
}

impl TemplateId {
    pub fn resolve(role: ArtifactRole<'_>) -> Option<TemplateId> {
        match role {
            ArtifactRole::StepClass(StepKind::Step) => Some(TemplateId::StepClass),
            ArtifactRole::StepClass(StepKind::Tasklet) => Some(TemplateId::TaskletClass),
            ArtifactRole::Record(RecordShape::Record) => Some(TemplateId::RecordIo),
            ArtifactRole::Record(RecordShape::Class) => Some(TemplateId::ClassIo),
            ArtifactRole::RowMapper {
                reader: ReaderKind::Paging,
                input,
            } => Some(match input {
                RecordShape::Record => TemplateId::RecordRowMapper,
                RecordShape::Class => TemplateId::ClassRowMapper,
            }),
            ArtifactRole::RowMapper { .. } => None,
            ArtifactRole::ObjectMapper(ProcessorKind::StructMapper) => {
                Some(TemplateId::ObjectMapper)
            }
            ArtifactRole::ObjectMapper(_) => None,
        }
    }
}

/// Templates needed for one step's class and records, given its reader.
///
/// Returns the step template, the record template for `record_shape` and the
/// row-mapper template when the reader asks for one.
pub fn resolve_template(
    step_kind: StepKind,
    record_shape: RecordShape,
    reader_kind: Option<&ReaderKind>,
) -> (TemplateId, Option<TemplateId>, Option<TemplateId>) {
    let step = match step_kind {
        StepKind::Step => TemplateId::StepClass,
        StepKind::Tasklet => TemplateId::TaskletClass,
    };
    if !step_kind.generates_records() {
        return (step, None, None);
    }
    let record = TemplateId::resolve(ArtifactRole::Record(record_shape));
    let row_mapper = reader_kind.and_then(|reader| {
        TemplateId::resolve(ArtifactRole::RowMapper {
            reader,
            input: record_shape,
        })
    });
    (step, record, row_mapper)
}

/// Row-mapper template and class name for a step, if one must be generated.
///
/// Requires a paging reader with a non-blank mapper class.
pub fn row_mapper_for<'s>(
    reader: &'s ReaderSpec,
    input: &RecordSpec,
) -> Option<(TemplateId, &'s str)> {
    let class = reader.row_mapper()?;
    let template = TemplateId::resolve(ArtifactRole::RowMapper {
        reader: &reader.kind,
        input: input.shape,
    })?;
    Some((template, class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn reader(kind: ReaderKind, mapper: Option<&str>) -> ReaderSpec {
        ReaderSpec {
            kind,
            row_mapper_class: mapper.map(str::to_string),
            extra: Map::new(),
        }
    }

    fn record(shape: RecordShape) -> RecordSpec {
        RecordSpec {
            class_name: "Customer".into(),
            shape,
            fields: vec![],
        }
    }

    #[test]
    fn resolves_every_row_of_the_table() {
        use ArtifactRole::*;
        let paging = ReaderKind::Paging;
        let other = ReaderKind::Other("FlatFileItemReader".into());

        assert_eq!(TemplateId::resolve(StepClass(StepKind::Step)), Some(TemplateId::StepClass));
        assert_eq!(
            TemplateId::resolve(StepClass(StepKind::Tasklet)),
            Some(TemplateId::TaskletClass)
        );
        assert_eq!(TemplateId::resolve(Record(RecordShape::Record)), Some(TemplateId::RecordIo));
        assert_eq!(TemplateId::resolve(Record(RecordShape::Class)), Some(TemplateId::ClassIo));
        assert_eq!(
            TemplateId::resolve(RowMapper { reader: &paging, input: RecordShape::Record }),
            Some(TemplateId::RecordRowMapper)
        );
        assert_eq!(
            TemplateId::resolve(RowMapper { reader: &paging, input: RecordShape::Class }),
            Some(TemplateId::ClassRowMapper)
        );
        assert_eq!(
            TemplateId::resolve(RowMapper { reader: &other, input: RecordShape::Record }),
            None
        );
        assert_eq!(
            TemplateId::resolve(ObjectMapper(&ProcessorKind::StructMapper)),
            Some(TemplateId::ObjectMapper)
        );
        assert_eq!(
            TemplateId::resolve(ObjectMapper(&ProcessorKind::Other("Custom".into()))),
            None
        );
    }

    #[test]
    fn tasklet_resolves_only_its_class() {
        let (step, record, mapper) =
            resolve_template(StepKind::Tasklet, RecordShape::Record, Some(&ReaderKind::Paging));
        assert_eq!(step, TemplateId::TaskletClass);
        assert_eq!(record, None);
        assert_eq!(mapper, None);
    }

    #[test]
    fn step_with_paging_reader_resolves_all_three() {
        let (step, record, mapper) =
            resolve_template(StepKind::Step, RecordShape::Class, Some(&ReaderKind::Paging));
        assert_eq!(step, TemplateId::StepClass);
        assert_eq!(record, Some(TemplateId::ClassIo));
        assert_eq!(mapper, Some(TemplateId::ClassRowMapper));
    }

    #[test]
    fn row_mapper_needs_a_class_name() {
        let input = record(RecordShape::Record);
        assert_eq!(row_mapper_for(&reader(ReaderKind::Paging, None), &input), None);
        assert_eq!(row_mapper_for(&reader(ReaderKind::Paging, Some("")), &input), None);
        assert_eq!(
            row_mapper_for(&reader(ReaderKind::Paging, Some("CustomerRowMapper")), &input),
            Some((TemplateId::RecordRowMapper, "CustomerRowMapper"))
        );
        assert_eq!(
            row_mapper_for(
                &reader(ReaderKind::Other("JdbcCursorItemReader".into()), Some("M")),
                &input
            ),
            None
        );
    }
}
