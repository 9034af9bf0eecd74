//! Project assembly: scaffold, configuration, then every planned file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, ScaffoldGenerator, TemplateRenderer},
    domain::{BatchSpec, GenerationPlan},
    error::ForgeResult,
};

/// A fully materialized project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledProject {
    pub root: PathBuf,
    /// Rendered files, not counting the configuration document.
    pub files_written: usize,
}

/// Materializes a [`GenerationPlan`] inside a working directory.
///
/// Strictly sequential: files are written in plan order and the first
/// failure aborts the rest. Nothing is rolled back here; the caller's
/// workspace guard discards the whole tree.
pub struct ProjectAssembler<'a> {
    scaffold: &'a dyn ScaffoldGenerator,
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ProjectAssembler<'a> {
    pub fn new(
        scaffold: &'a dyn ScaffoldGenerator,
        renderer: &'a dyn TemplateRenderer,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            scaffold,
            renderer,
            filesystem,
        }
    }

    #[instrument(
        skip_all,
        fields(artifact = %spec.artifact_id, workspace = %workspace.display())
    )]
    pub fn assemble(
        &self,
        spec: &BatchSpec,
        plan: &GenerationPlan,
        workspace: &Path,
    ) -> ForgeResult<AssembledProject> {
        // 1. Base project from the external generator
        let root = self.scaffold.generate(&spec.coordinates(), workspace)?;
        info!(root = %root.display(), "Base project scaffolded");

        // 2. Configuration document, verbatim
        self.write(&root.join(plan.config_path()), spec.config_text())?;

        // 3. Generated sources, in declaration order
        for file in plan.files() {
            let content = self.renderer.render(file.template, &file.context)?;
            self.write(&root.join(&file.path), &content)?;
            debug!(
                step = %file.step,
                template = %file.template,
                path = %file.path,
                "Generated"
            );
        }

        info!(files = plan.len(), "Project assembled");
        Ok(AssembledProject {
            root,
            files_written: plan.len(),
        })
    }

    fn write(&self, path: &Path, content: &str) -> ForgeResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockFilesystem, MockScaffoldGenerator, MockTemplateRenderer};
    use crate::domain::{SpecificationIntake, TemplateId};
    use mockall::Sequence;
    use serde_json::json;

    fn spec() -> BatchSpec {
        SpecificationIntake::accept(&json!({
            "batch": {
                "groupId": "com.acme", "artifactId": "demo", "pkg": "com.acme",
                "version": "1.0.0", "generatedConfig": "spring: {}",
                "steps": [
                    { "name": "first", "type": "TASKLET" },
                    { "name": "second", "type": "TASKLET" }
                ]
            }
        }))
        .unwrap()
    }

    fn scaffold_at(root: &'static str) -> MockScaffoldGenerator {
        let mut scaffold = MockScaffoldGenerator::new();
        scaffold
            .expect_generate()
            .times(1)
            .returning(move |_, _| Ok(PathBuf::from(root)));
        scaffold
    }

    #[test]
    fn writes_config_then_files_in_order() {
        let spec = spec();
        let plan = GenerationPlan::for_batch(&spec).unwrap();

        let scaffold = scaffold_at("/ws/demo");
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|id, ctx| Ok(format!("{}:{}", id, ctx["name"])));

        let mut seq = Sequence::new();
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| p.ends_with("src/main/resources/application.yml") && c == "spring: {}")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| p.ends_with("step/first.java") && c == "tasklet-class:\"first\"")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p.ends_with("step/second.java"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let assembled = ProjectAssembler::new(&scaffold, &renderer, &fs)
            .assemble(&spec, &plan, Path::new("/ws"))
            .unwrap();
        assert_eq!(assembled.root, PathBuf::from("/ws/demo"));
        assert_eq!(assembled.files_written, 2);
    }

    #[test]
    fn render_failure_stops_remaining_steps() {
        let spec = spec();
        let plan = GenerationPlan::for_batch(&spec).unwrap();

        let scaffold = scaffold_at("/ws/demo");
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().times(1).returning(|id, _| {
            Err(ApplicationError::RenderingFailed {
                template: id,
                reason: "bad".into(),
            }
            .into())
        });

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        // Only the configuration document gets written.
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let err = ProjectAssembler::new(&scaffold, &renderer, &fs)
            .assemble(&spec, &plan, Path::new("/ws"))
            .unwrap_err();
        assert!(err.to_string().contains(TemplateId::TaskletClass.as_str()));
    }

    #[test]
    fn scaffold_failure_writes_nothing() {
        let spec = spec();
        let plan = GenerationPlan::for_batch(&spec).unwrap();

        let mut scaffold = MockScaffoldGenerator::new();
        scaffold.expect_generate().returning(|_, _| {
            Err(ApplicationError::ScaffoldFailed {
                command: "mvn".into(),
                reason: "exit status 1".into(),
            }
            .into())
        });
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        assert!(
            ProjectAssembler::new(&scaffold, &renderer, &fs)
                .assemble(&spec, &plan, Path::new("/ws"))
                .is_err()
        );
    }
}
