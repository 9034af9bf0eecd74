//! Built-in templates.
//!
//! The seven templates the generator needs are compiled into the binary, so a
//! fresh install works without any template directory. A configured override
//! directory (see [`crate::template_loader`]) can replace any of them by file
//! name.
//!
//! # Files
//!
//! | Identifier          | File                       |
//! |---------------------|----------------------------|
//! | `step-class`        | `StepSteplet.java.hbs`     |
//! | `tasklet-class`     | `Tasklet.java.hbs`         |
//! | `record-io`         | `IORecord.java.hbs`        |
//! | `class-io`          | `IOClass.java.hbs`         |
//! | `record-row-mapper` | `RowMapperRecord.java.hbs` |
//! | `class-row-mapper`  | `RowMapperClass.java.hbs`  |
//! | `object-mapper`     | `MapStructMapper.java.hbs` |

use std::collections::BTreeMap;

use batchforge_core::application::ports::{TemplateOrigin, TemplateSource};
use batchforge_core::domain::TemplateId;

const STEP_CLASS: &str = include_str!("../templates/StepSteplet.java.hbs");
const TASKLET_CLASS: &str = include_str!("../templates/Tasklet.java.hbs");
const RECORD_IO: &str = include_str!("../templates/IORecord.java.hbs");
const CLASS_IO: &str = include_str!("../templates/IOClass.java.hbs");
const RECORD_ROW_MAPPER: &str = include_str!("../templates/RowMapperRecord.java.hbs");
const CLASS_ROW_MAPPER: &str = include_str!("../templates/RowMapperClass.java.hbs");
const OBJECT_MAPPER: &str = include_str!("../templates/MapStructMapper.java.hbs");

/// Embedded text for a template.
pub fn builtin_text(id: TemplateId) -> &'static str {
    match id {
        TemplateId::StepClass => STEP_CLASS,
        TemplateId::TaskletClass => TASKLET_CLASS,
        TemplateId::RecordIo => RECORD_IO,
        TemplateId::ClassIo => CLASS_IO,
        TemplateId::RecordRowMapper => RECORD_ROW_MAPPER,
        TemplateId::ClassRowMapper => CLASS_ROW_MAPPER,
        TemplateId::ObjectMapper => OBJECT_MAPPER,
    }
}

/// Every built-in template, keyed by identifier.
pub fn builtin_sources() -> BTreeMap<TemplateId, TemplateSource> {
    TemplateId::ALL
        .into_iter()
        .map(|id| {
            (
                id,
                TemplateSource {
                    id,
                    origin: TemplateOrigin::Builtin,
                    text: builtin_text(id).to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identifier_has_text() {
        let sources = builtin_sources();
        assert_eq!(sources.len(), TemplateId::ALL.len());
        for (id, source) in sources {
            assert!(source.text.contains("package {{package}}"), "{id}");
        }
    }
}
