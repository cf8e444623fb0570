//! Deterministische Referenz-Engine: Kugeln um die Klickpunkte.

use super::SegmentationEngine;
use crate::core::{
    LabelVolume, OperationKind, SegmentationFlags, SessionParameters, VolumeGeometry,
};
use anyhow::{anyhow, bail};
use glam::Vec3;

/// Radius eines neuen Objekts (mm).
pub const SPHERE_BASE_RADIUS: f32 = 8.0;
/// Radius der Kugel um einen lokalen Verfeinerungspunkt (mm).
pub const SPHERE_LOCAL_RADIUS: f32 = 4.0;
/// Anteil des Radius, der im nekrotischen Modus hohl bleibt.
pub const NECROTIC_CORE_FRACTION: f32 = 0.4;

const SPLITTING_FACTOR: f32 = 0.75;
const DENOISE_FACTOR: f32 = 0.9;
const LINEAR_COST_FACTOR: f32 = 1.1;

#[derive(Debug, Clone, Copy)]
struct Ball {
    center: Vec3,
    radius: f32,
}

impl Ball {
    fn contains(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Zeichnet das Zielobjekt als Kugel (plus lokale Kugeln) ins Basisbild.
///
/// - Radius: Basisradius bzw. Abstand Zentrum → globaler Punkt
/// - Flags skalieren den Radius; `sealing` vergrößert um einen Voxel
/// - `allow_overwriting` steuert, ob fremde Labels übermalt werden
#[derive(Debug, Default, Clone)]
pub struct SphereEngine {
    runs: usize,
}

impl SphereEngine {
    /// Neue Engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl erfolgreicher Läufe.
    pub fn runs(&self) -> usize {
        self.runs
    }

    fn segment(
        &mut self,
        kind: OperationKind,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        if params.label == 0 {
            bail!("Zielobjekt ohne Label-Wert");
        }
        let geometry = *base.geometry();
        let center = resolve_center(params, &geometry)?;

        let main_radius = match kind {
            OperationKind::New => SPHERE_BASE_RADIUS,
            OperationKind::GlobalRefinement | OperationKind::LocalRefinement => params
                .global_refinement_points
                .last()
                .map_or(SPHERE_BASE_RADIUS, |point| point.distance(center)),
        };
        let factor = radius_factor(&params.flags);
        let sealing_margin = if params.flags.sealing {
            geometry.spacing.max_element()
        } else {
            0.0
        };

        let main = Ball {
            center,
            radius: main_radius * factor + sealing_margin,
        };
        let mut balls = vec![main];
        if kind == OperationKind::LocalRefinement {
            balls.extend(params.local_refinement_points.points().iter().map(|&point| Ball {
                center: point,
                radius: SPHERE_LOCAL_RADIUS * factor + sealing_margin,
            }));
        }
        let core = params.flags.necrotic_region.then(|| Ball {
            center,
            radius: main.radius * NECROTIC_CORE_FRACTION,
        });

        let mut result = base.clone();
        let [nx, ny, nz] = geometry.dimensions;
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let index = [x, y, z];
                    let existing = result.get(index);
                    if existing == params.label {
                        result.set(index, 0);
                    }
                    let world = geometry.index_to_world(index);
                    if !balls.iter().any(|ball| ball.contains(world)) {
                        continue;
                    }
                    if core.is_some_and(|core| core.contains(world)) {
                        continue;
                    }
                    if existing == 0 || existing == params.label || params.flags.allow_overwriting {
                        result.set(index, params.label);
                    }
                }
            }
        }

        self.runs += 1;
        log::debug!(
            "SphereEngine {:?}: Radius {:.1} mm, {} Voxel mit Label {}",
            kind,
            main.radius,
            result.count_label(params.label),
            params.label
        );
        Ok(result)
    }
}

fn radius_factor(flags: &SegmentationFlags) -> f32 {
    let mut factor = 1.0;
    if flags.splitting {
        factor *= SPLITTING_FACTOR;
    }
    if flags.denoise_threshold {
        factor *= DENOISE_FACTOR;
    }
    if flags.linear_cost {
        factor *= LINEAR_COST_FACTOR;
    }
    factor
}

fn resolve_center(params: &SessionParameters, geometry: &VolumeGeometry) -> anyhow::Result<Vec3> {
    let center = params
        .center()
        .ok_or_else(|| anyhow!("Kein Zentrumspunkt gesetzt"))?;
    let index = geometry
        .world_to_index(center)
        .ok_or_else(|| anyhow!("Zentrumspunkt {:?} liegt außerhalb des Volumens", center))?;
    if params.flags.assist_centering {
        Ok(geometry.index_to_world(index))
    } else {
        Ok(center)
    }
}

impl SegmentationEngine for SphereEngine {
    fn name(&self) -> &str {
        "sphere"
    }

    fn apply(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.segment(OperationKind::New, params, base)
    }

    fn apply_global_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.segment(OperationKind::GlobalRefinement, params, base)
    }

    fn apply_local_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume> {
        self.segment(OperationKind::LocalRefinement, params, base)
    }
}
