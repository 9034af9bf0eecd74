use serde_json::{Value, json};

use crate::domain::dispatch::{ArtifactRole, row_mapper_for};
use crate::domain::entities::batch::{BatchSpec, RecordSpec, StepSpec};
use crate::domain::entities::common::{RelativePath, ensure_safe_segment};
use crate::domain::error::DomainError;
use crate::domain::mapper::{derive_mapper_context, mapper_class_name};
use crate::domain::value_objects::TemplateId;

/// Where the configuration document goes inside the project.
pub const CONFIG_RESOURCE: &str = "src/main/resources/application.yml";

/// Root of Java sources inside the project.
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// Sub-packages generated files are placed in.
pub const STEP_DIR: &str = "step";
pub const DTO_DIR: &str = "dto";
pub const MAPPER_DIR: &str = "mapper";

/// Every file a batch description produces, in generation order.
///
/// Built purely from the [`BatchSpec`]: no rendering, no I/O. Paths are
/// relative to the scaffolded project root.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub(crate) config_path: RelativePath,
    pub(crate) source_root: RelativePath,
    pub(crate) files: Vec<PlannedFile>,
}

/// One file to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub template: TemplateId,
    pub path: RelativePath,
    pub context: Value,
    /// Name of the step this file belongs to.
    pub step: String,
}

impl GenerationPlan {
    pub fn for_batch(spec: &BatchSpec) -> Result<Self, DomainError> {
        // artifactId names the scaffolded directory and the archive.
        ensure_safe_segment(&spec.artifact_id, "artifactId")?;
        let config_path = RelativePath::try_new(CONFIG_RESOURCE)?;
        let source_root = package_dir(&spec.pkg)?;

        let mut plan = Self {
            config_path,
            source_root,
            files: Vec::new(),
        };
        for step in &spec.steps {
            plan.plan_step(&spec.pkg, step)?;
        }
        Ok(plan)
    }

    fn plan_step(&mut self, pkg: &str, step: &StepSpec) -> Result<(), DomainError> {
        let step_template = TemplateId::resolve(ArtifactRole::StepClass(step.kind))
            .ok_or_else(|| DomainError::UnknownTemplate(step.kind.to_string()))?;
        let step_dir = self.source_root.join(STEP_DIR, "package directory")?;
        self.push(
            step,
            step_template,
            step_dir.join(&java_file(&step.name), "step name")?,
            with_package(serde_json::to_value(step), pkg)?,
        );

        if !step.kind.generates_records() {
            return Ok(());
        }

        let input = step.input.as_ref().ok_or_else(|| incomplete(step, "input"))?;
        let output = step.output.as_ref().ok_or_else(|| incomplete(step, "output"))?;
        for record in [input, output] {
            self.plan_record(pkg, step, record)?;
        }

        let mapper_dir = self.source_root.join(MAPPER_DIR, "package directory")?;

        if let Some((template, class)) = step.reader.as_ref().and_then(|r| row_mapper_for(r, input)) {
            let context = json!({
                "package": pkg,
                "mapperClass": class,
                "input": input,
                "reader": step.reader,
            });
            self.push(
                step,
                template,
                mapper_dir.join(&java_file(class), "row mapper class")?,
                context,
            );
        }

        if let Some(processor) = &step.processor {
            if let Some(template) = TemplateId::resolve(ArtifactRole::ObjectMapper(&processor.kind)) {
                let class = mapper_class_name(step, processor);
                let context = derive_mapper_context(pkg, step, processor);
                self.push(
                    step,
                    template,
                    mapper_dir.join(&java_file(&class), "object mapper class")?,
                    serde_json::to_value(context).map_err(malformed)?,
                );
            }
        }

        Ok(())
    }

    fn plan_record(
        &mut self,
        pkg: &str,
        step: &StepSpec,
        record: &RecordSpec,
    ) -> Result<(), DomainError> {
        let template = TemplateId::resolve(ArtifactRole::Record(record.shape))
            .ok_or_else(|| DomainError::UnknownTemplate(record.shape.to_string()))?;
        let dto_dir = self.source_root.join(DTO_DIR, "package directory")?;
        self.push(
            step,
            template,
            dto_dir.join(&java_file(&record.class_name), "record class name")?,
            with_package(serde_json::to_value(record), pkg)?,
        );
        Ok(())
    }

    fn push(&mut self, step: &StepSpec, template: TemplateId, path: RelativePath, context: Value) {
        self.files.push(PlannedFile {
            template,
            path,
            context,
            step: step.name.clone(),
        });
    }

    pub fn config_path(&self) -> &RelativePath {
        &self.config_path
    }

    /// `src/main/java/<pkg as directories>`.
    pub fn source_root(&self) -> &RelativePath {
        &self.source_root
    }

    pub fn files(&self) -> &[PlannedFile] {
        &self.files
    }

    pub fn files_for_step<'a>(&'a self, step: &'a str) -> impl Iterator<Item = &'a PlannedFile> {
        self.files.iter().filter(move |f| f.step == step)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Dotted package to nested source directories.
pub fn package_dir(pkg: &str) -> Result<RelativePath, DomainError> {
    let mut dir = RelativePath::try_new(JAVA_SOURCE_ROOT)?;
    for segment in pkg.split('.') {
        if segment.trim().is_empty() {
            return Err(DomainError::InvalidPackage {
                pkg: pkg.to_string(),
                reason: "empty package segment".into(),
            });
        }
        dir = dir.join(segment, "package").map_err(|_| DomainError::InvalidPackage {
            pkg: pkg.to_string(),
            reason: format!("'{segment}' is not a valid package segment"),
        })?;
    }
    Ok(dir)
}

fn java_file(class_name: &str) -> String {
    format!("{}.java", class_name.trim())
}

fn with_package(value: serde_json::Result<Value>, pkg: &str) -> Result<Value, DomainError> {
    let mut value = value.map_err(malformed)?;
    if let Value::Object(map) = &mut value {
        map.insert("package".into(), Value::String(pkg.to_string()));
    }
    Ok(value)
}

fn incomplete(step: &StepSpec, field: &'static str) -> DomainError {
    DomainError::IncompleteStep {
        step: step.name.clone(),
        field,
    }
}

fn malformed(e: serde_json::Error) -> DomainError {
    DomainError::MalformedSpec {
        reason: e.to_string(),
    }
}
