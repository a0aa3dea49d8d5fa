use anyhow::Context;
use celltracecore::model::Tower;
use celltracecore::GeoPoint;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

/// Cell id of the registry entry that no trail ever observes.
pub const UNOBSERVED_CELL_ID: i64 = 99_999;
const FIRST_CELL_ID: i64 = 22_801;

/// Configuration for generating a synthetic trace dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub center: GeoPoint,
    pub towers: usize,
    pub tower_ring_deg: f64,
    pub points_per_trail: usize,
    pub step_deg: f64,
    pub noise_db: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(43.041169, 12.560277),
            towers: 4,
            tower_ring_deg: 0.02,
            points_per_trail: 120,
            step_deg: 0.0008,
            noise_db: 3.0,
            seed: 0,
        }
    }
}

/// Paths of the files written by [`write_dataset`].
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub current: PathBuf,
    pub legacy: PathBuf,
    pub towers: PathBuf,
}

struct Sample {
    point: GeoPoint,
    altitude: f64,
    cell_id: i64,
    signal: i32,
}

fn build_towers(config: &GeneratorConfig) -> Vec<Tower> {
    let count = config.towers.max(1);
    (0..count)
        .map(|index| {
            let angle = index as f64 / count as f64 * 2.0 * PI;
            Tower::new(
                config.center.latitude() + config.tower_ring_deg * angle.sin(),
                config.center.longitude() + config.tower_ring_deg * angle.cos(),
                FIRST_CELL_ID + index as i64,
            )
        })
        .collect()
}

fn distance_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    (a.latitude() - b.latitude()).hypot(a.longitude() - b.longitude())
}

/// Random walk from the center, each sample served by its nearest tower.
fn build_walk(config: &GeneratorConfig, towers: &[Tower], rng: &mut StdRng) -> Vec<Sample> {
    let mut point = config.center;
    let mut heading = rng.gen_range(0.0..2.0 * PI);
    let mut samples = Vec::with_capacity(config.points_per_trail);

    for _ in 0..config.points_per_trail {
        heading += rng.gen_range(-0.4..0.4);
        point = GeoPoint::new(
            point.latitude() + config.step_deg * heading.sin(),
            point.longitude() + config.step_deg * heading.cos(),
        );

        let Some((tower, distance)) = towers
            .iter()
            .map(|tower| (tower, distance_deg(point, tower.point())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            continue;
        };

        let path_loss = 40.0 * distance / config.tower_ring_deg.max(f64::EPSILON);
        let jitter = if config.noise_db > 0.0 {
            rng.gen_range(-config.noise_db..config.noise_db)
        } else {
            0.0
        };
        samples.push(Sample {
            point,
            altitude: 250.0 + rng.gen_range(0.0..60.0),
            cell_id: tower.cell_id,
            signal: (-70.0 - path_loss + jitter).round().clamp(-140.0, -44.0) as i32,
        });
    }
    samples
}

fn write_current(path: &Path, samples: &[Sample]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["lat", "lon", "altitude", "net_type", "cell_id", "rsrp", "rssi"])?;
    for (index, sample) in samples.iter().enumerate() {
        let lte = index % 4 != 3;
        let signal = sample.signal.to_string();
        writer.write_record([
            sample.point.latitude().to_string(),
            sample.point.longitude().to_string(),
            format!("{:.1}", sample.altitude),
            if lte { "LTE" } else { "UMTS" }.to_string(),
            sample.cell_id.to_string(),
            if lte { signal.clone() } else { String::new() },
            if lte { String::new() } else { signal },
        ])?;
    }
    // Logger output while the GPS fix was lost.
    writer.write_record(["", "", "", "LTE", "", "", ""])?;
    writer.flush()?;
    Ok(())
}

fn write_legacy(path: &Path, samples: &[Sample]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (index, sample) in samples.iter().enumerate() {
        writer.write_record([
            sample.point.latitude().to_string(),
            sample.point.longitude().to_string(),
            format!("{:.0}", sample.altitude),
            "0.0".to_string(),
            "5".to_string(),
            index.to_string(),
            sample.cell_id.to_string(),
            sample.signal.to_string(),
        ])?;
    }
    writer.write_record(["n/a", "n/a", "", "", "", "", "", ""])?;
    writer.flush()?;
    Ok(())
}

fn write_registry(path: &Path, towers: &[Tower]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for tower in towers {
        writer.write_record([
            "LTE".to_string(),
            tower.cell_id.to_string(),
            "222".to_string(),
            "10".to_string(),
            tower.latitude.to_string(),
            tower.longitude.to_string(),
            "1".to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a `current` trail, a `legacy` trail and a tower registry into `dir`.
pub fn write_dataset(dir: &Path, config: &GeneratorConfig) -> anyhow::Result<GeneratedDataset> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut towers = build_towers(config);
    let current_walk = build_walk(config, &towers, &mut rng);
    let legacy_walk = build_walk(config, &towers, &mut rng);

    towers.push(Tower::new(
        config.center.latitude() - 2.0 * config.tower_ring_deg,
        config.center.longitude(),
        UNOBSERVED_CELL_ID,
    ));

    let dataset = GeneratedDataset {
        current: dir.join("trace-current.csv"),
        legacy: dir.join("trace-legacy.csv"),
        towers: dir.join("towers.csv"),
    };
    write_current(&dataset.current, &current_walk)?;
    write_legacy(&dataset.legacy, &legacy_walk)?;
    write_registry(&dataset.towers, &towers)?;
    Ok(dataset)
}
