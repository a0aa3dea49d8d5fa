use crate::analysis::{select_best_tower, HullBuilder, SignalColorizer};
use crate::ingest::{load_source, ObservationSource, ParsedSource, TowerRegistry};
use crate::model::{
    BestTower, MatchGroup, Observation, ObservedCellIds, RenderDirective, RenderStyle, Trail,
};
use crate::prelude::{GeoPoint, PipelineResult, PipelineWarning};
use crate::telemetry::{IngestMetrics, LogManager, MetricsRecorder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inputs of one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub observations: Vec<ObservationSource>,
    pub towers: Vec<PathBuf>,
    #[serde(default)]
    pub style: RenderStyle,
}

/// Everything a run produced, in emission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOutput {
    pub directives: Vec<RenderDirective>,
    pub best: Option<BestTower>,
    pub warnings: Vec<PipelineWarning>,
    pub metrics: IngestMetrics,
}

/// Parses sources, correlates towers and emits render directives.
pub struct Pipeline {
    config: PipelineConfig,
    colorizer: SignalColorizer,
    hull: HullBuilder,
    logger: LogManager,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            colorizer: SignalColorizer::default(),
            hull: HullBuilder::new(),
            logger: LogManager::new("pipeline"),
        }
    }

    /// Reads every configured file, then assembles the output.
    ///
    /// An unreadable source aborts the run; malformed rows never do.
    pub fn run(&self) -> PipelineResult<PipelineOutput> {
        let sources = self
            .config
            .observations
            .iter()
            .map(load_source)
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = TowerRegistry::new();
        for path in &self.config.towers {
            registry.load_file(path)?;
        }

        Ok(self.assemble(sources, registry))
    }

    /// In-memory tail of [`Pipeline::run`].
    pub fn assemble(&self, sources: Vec<ParsedSource>, registry: TowerRegistry) -> PipelineOutput {
        let metrics = MetricsRecorder::new();
        let mut observed = ObservedCellIds::new();
        let mut trails = Vec::with_capacity(sources.len());
        for parsed in sources {
            metrics.record_rows(parsed.trail.observations.len(), parsed.skipped);
            observed.merge(parsed.cell_ids);
            trails.push(parsed.trail);
        }

        metrics.record_towers(registry.towers().len(), registry.skipped());
        let towers = registry.retain_observed(&observed);
        metrics.record_retained(towers.len());
        self.logger.record(&format!(
            "{} trails, {} distinct cells, {} towers retained",
            trails.len(),
            observed.len(),
            towers.len()
        ));

        let observations: Vec<Observation> = trails
            .iter()
            .flat_map(|trail| trail.observations.iter().copied())
            .collect();

        let style = &self.config.style;
        let mut directives = self.trail_directives(&trails);
        directives.extend(towers.iter().map(|tower| RenderDirective::Marker {
            point: tower.point(),
            radius: style.tower_radius,
            color: style.tower_color.clone(),
            popup: format!("Cell ID: {}", tower.cell_id),
        }));

        let mut warnings = Vec::new();
        let best = match select_best_tower(&towers, &observations) {
            Some(group) => {
                self.logger.record(&format!(
                    "best tower: cell {} with {} matches",
                    group.tower.cell_id,
                    group.match_count()
                ));
                directives.extend(self.match_directives(&group, &mut warnings));
                Some(BestTower::from(&group))
            }
            None => {
                let warning = PipelineWarning::NoMatch;
                self.logger.warn(&warning.to_string());
                warnings.push(warning);
                None
            }
        };

        PipelineOutput {
            directives,
            best,
            warnings,
            metrics: metrics.snapshot(),
        }
    }

    fn trail_directives(&self, trails: &[Trail]) -> Vec<RenderDirective> {
        trails
            .iter()
            .filter(|trail| !trail.points.is_empty())
            .map(|trail| RenderDirective::Polyline {
                points: trail.points.clone(),
                color: self.config.style.trail_color.clone(),
                tooltip: trail.label.clone(),
            })
            .collect()
    }

    /// Highlighted tower, colored points and, when possible, the hull.
    fn match_directives(
        &self,
        group: &MatchGroup,
        warnings: &mut Vec<PipelineWarning>,
    ) -> Vec<RenderDirective> {
        let style = &self.config.style;
        let mut directives = vec![RenderDirective::Marker {
            point: group.tower.point(),
            radius: style.best_tower_radius,
            color: style.best_tower_color.clone(),
            popup: format!(
                "Best tower: cell {} ({} matches)",
                group.tower.cell_id,
                group.match_count()
            ),
        }];

        directives.extend(
            self.colorizer
                .colorize(&group.observations)
                .into_iter()
                .map(|point| RenderDirective::Marker {
                    point: GeoPoint::new(point.latitude, point.longitude),
                    radius: style.point_radius,
                    color: point.color,
                    popup: point.tooltip,
                }),
        );

        match self.hull.build(&group.hull_input()) {
            Ok(vertices) => directives.push(RenderDirective::Polygon {
                vertices,
                color: style.hull_color.clone(),
                fill_opacity: style.hull_fill_opacity,
            }),
            Err(err) => {
                let warning = PipelineWarning::from(err);
                self.logger.warn(&warning.to_string());
                warnings.push(warning);
            }
        }
        directives
    }
}
