use crate::render_bridge::model::MapView;
use crate::workflow::discovery::expand_sources;
use anyhow::Context;
use celltracecore::ingest::ObservationSource;
use celltracecore::model::{RenderStyle, Schema};
use celltracecore::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_output() -> PathBuf {
    PathBuf::from("map_directives.json")
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Files or directories of `*.csv` files.
    pub observations: Vec<ObservationSource>,
    #[serde(default)]
    pub towers: Vec<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub style: RenderStyle,
    #[serde(default)]
    pub view: MapView,
}

impl WorkflowConfig {
    /// Reads YAML; relative paths are taken from the config file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let mut config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        if let Some(base) = path_ref.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    pub fn from_args(current: Vec<PathBuf>, legacy: Vec<PathBuf>, towers: Vec<PathBuf>) -> Self {
        let observations = current
            .into_iter()
            .map(|path| ObservationSource::new(path, Schema::Current))
            .chain(
                legacy
                    .into_iter()
                    .map(|path| ObservationSource::new(path, Schema::Legacy)),
            )
            .collect();
        Self {
            observations,
            towers,
            output: default_output(),
            style: RenderStyle::default(),
            view: MapView::default(),
        }
    }

    pub fn to_pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        Ok(PipelineConfig {
            observations: expand_sources(&self.observations)?,
            towers: self.towers.clone(),
            style: self.style.clone(),
        })
    }

    fn rebase(&mut self, base: &Path) {
        let join = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        self.observations
            .iter_mut()
            .for_each(|source| join(&mut source.path));
        self.towers.iter_mut().for_each(join);
        join(&mut self.output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_tags_schemas() {
        let cfg = WorkflowConfig::from_args(
            vec![PathBuf::from("/data/new.csv")],
            vec![PathBuf::from("/data/old.csv")],
            vec![PathBuf::from("/data/towers.csv")],
        );
        let pipeline = cfg.to_pipeline_config().unwrap();
        assert_eq!(pipeline.observations.len(), 2);
        assert_eq!(pipeline.observations[0].schema, Schema::Current);
        assert_eq!(pipeline.observations[1].schema, Schema::Legacy);
        assert_eq!(cfg.output, PathBuf::from("map_directives.json"));
    }

    #[test]
    fn config_load_reads_yaml_and_rebases_paths() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"observations:\n  - path: trips/2023-05-01.csv\n    schema: current\n    label: monday\n  - path: /abs/old.csv\n    schema: legacy\ntowers: [registry.csv]\nstyle:\n  trail_color: green\nview:\n  zoom: 14\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let base = path.parent().unwrap().to_path_buf();

        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.observations[0].path, base.join("trips/2023-05-01.csv"));
        assert_eq!(cfg.observations[0].label.as_deref(), Some("monday"));
        assert_eq!(cfg.observations[1].path, PathBuf::from("/abs/old.csv"));
        assert_eq!(cfg.towers, vec![base.join("registry.csv")]);
        assert_eq!(cfg.output, base.join("map_directives.json"));
        assert_eq!(cfg.style.trail_color, "green");
        assert_eq!(cfg.style.best_tower_color, "red");
        assert_eq!(cfg.view.zoom, 14);
    }

    #[test]
    fn config_load_rejects_unknown_schema() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"observations:\n  - path: a.csv\n    schema: v3\n")
            .unwrap();
        let path = temp.into_temp_path();
        assert!(WorkflowConfig::load(&path).is_err());
    }
}
