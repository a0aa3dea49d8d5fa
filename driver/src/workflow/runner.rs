use crate::render_bridge::model::RenderModel;
use crate::workflow::config::WorkflowConfig;
use anyhow::{bail, Context};
use celltracecore::Pipeline;
use std::fs;

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<RenderModel> {
        let pipeline_config = self
            .config
            .to_pipeline_config()
            .context("resolving observation sources")?;
        if pipeline_config.observations.is_empty() {
            bail!("no observation files found in the configured sources");
        }
        let output = Pipeline::new(pipeline_config)
            .run()
            .context("running correlation pipeline")?;
        Ok(RenderModel::from_output(self.config.view, output))
    }

    /// Writes the model as pretty JSON to the configured output path.
    pub fn write(&self, model: &RenderModel) -> anyhow::Result<()> {
        let path = &self.config.output;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(model).context("serializing render model")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
