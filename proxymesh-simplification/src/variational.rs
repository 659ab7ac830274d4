//! Variational shape approximation with planar proxies
//!
//! Alternates a geometric partition, which assigns every facet to the proxy
//! whose normal it deviates from least (weighted by facet area), with a refit
//! that moves each proxy to the mean centroid and mean normal of its facets.
//! Whenever the worst facet still exceeds the error threshold, a new proxy is
//! seeded on it. A facet's recorded best error only ever decreases over a run.

use crate::proxy::{Plane, ProxyAssignment, ProxyField, ProxyId};
use proxymesh_core::geometry::unit;
use proxymesh_core::{FacetGeometry, FacetId, MeshView, Point3f, Result, Vector3f};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for a [`VariationalShapeApproximation`] run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VsaConfig {
    /// Stop once the best per-pass maximum facet error drops to this value
    pub error_threshold: f32,
    /// Number of initial proxies, clamped into `1..=facet_count`
    pub num_seeds: usize,
    /// Hard cap on partition-refit passes
    pub max_iterations: usize,
    /// Seed for the facet sampler; `None` draws from the thread-local generator
    pub seed: Option<u64>,
}

impl Default for VsaConfig {
    fn default() -> Self {
        Self {
            error_threshold: 0.1,
            num_seeds: 1,
            max_iterations: 100,
            seed: None,
        }
    }
}

impl VsaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_threshold(mut self, error_threshold: f32) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    pub fn with_num_seeds(mut self, num_seeds: usize) -> Self {
        self.num_seeds = num_seeds;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Geometry of one facet, computed once per run
#[derive(Debug, Clone, Copy)]
struct FacetSample {
    normal: Vector3f,
    centroid: Point3f,
    area: f32,
}

impl FacetSample {
    fn error_to(&self, proxy: &Plane) -> f32 {
        (proxy.normal - self.normal).magnitude() * self.area
    }
}

/// Running sums for one proxy during a refit pass
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    normal: Vector3f,
    point: Vector3f,
    count: u32,
}

/// Worst facet seen during a refit pass
#[derive(Debug, Clone, Copy, PartialEq)]
struct WorstFacet {
    facet: FacetId,
    error: f32,
}

/// Variational shape approximation driver
#[derive(Debug, Clone, Default)]
pub struct VariationalShapeApproximation {
    pub config: VsaConfig,
}

impl VariationalShapeApproximation {
    pub fn new(config: VsaConfig) -> Self {
        Self { config }
    }

    /// Approximate `mesh` by planar proxies, seeding from the configured source.
    pub fn approximate<M: MeshView + ?Sized>(&self, mesh: &M) -> Result<ProxyField> {
        match self.config.seed {
            Some(seed) => self.approximate_with_rng(mesh, &mut StdRng::seed_from_u64(seed)),
            None => self.approximate_with_rng(mesh, &mut rand::thread_rng()),
        }
    }

    /// Approximate `mesh` by planar proxies, drawing seed facets from `rng`.
    ///
    /// Fails with a degenerate-geometry error if any facet has no defined normal.
    /// An empty mesh yields an empty field.
    pub fn approximate_with_rng<M, R>(&self, mesh: &M, rng: &mut R) -> Result<ProxyField>
    where
        M: MeshView + ?Sized,
        R: Rng + ?Sized,
    {
        let facet_count = mesh.facet_count();
        if facet_count == 0 {
            tracing::info!("mesh has no facets, nothing to approximate");
            return Ok(ProxyField::default());
        }

        let samples = sample_facets(mesh)?;
        let mut assignments: Vec<ProxyAssignment> =
            (0..facet_count).map(ProxyAssignment::unassigned).collect();

        let mut proxies = sample_seeds(facet_count, self.config.num_seeds, rng)
            .into_iter()
            .map(|facet| Plane::from_facet(mesh, facet))
            .collect::<Result<Vec<Plane>>>()?;

        let threshold = self.config.error_threshold;
        let mut accumulators = Vec::with_capacity(proxies.len());
        let mut best_max_error = f32::INFINITY;
        let mut iterations = 0;

        while best_max_error > threshold && iterations < self.config.max_iterations {
            partition(&samples, &proxies, &mut assignments);
            let worst = refit(&samples, &mut proxies, &assignments, &mut accumulators);

            tracing::debug!(
                iteration = iterations,
                proxies = proxies.len(),
                mean_error = mean_error(&assignments),
                max_error = worst.error,
                worst_facet = worst.facet,
                "refit pass"
            );

            if worst.error > threshold {
                proxies.push(Plane::from_facet(mesh, worst.facet)?);
            }
            best_max_error = best_max_error.min(worst.error);
            iterations += 1;
        }

        let field = ProxyField { proxies, assignments, iterations, max_error: best_max_error };
        if best_max_error > threshold {
            tracing::info!(
                iterations,
                proxies = field.proxy_count(),
                max_error = best_max_error,
                "iteration cap reached before the error threshold"
            );
        } else {
            tracing::info!(
                iterations,
                proxies = field.proxy_count(),
                mean_error = field.mean_error(),
                "approximation converged"
            );
        }
        Ok(field)
    }
}

/// Run [`VariationalShapeApproximation`] with default settings
/// (threshold 0.1, one seed).
pub fn approximate<M: MeshView + ?Sized>(mesh: &M) -> Result<ProxyField> {
    VariationalShapeApproximation::default().approximate(mesh)
}

fn sample_facets<M: MeshView + ?Sized>(mesh: &M) -> Result<Vec<FacetSample>> {
    (0..mesh.facet_count())
        .map(|facet| {
            Ok(FacetSample {
                normal: mesh.facet_normal(facet)?,
                centroid: mesh.facet_centroid(facet)?,
                area: mesh.facet_area(facet)?,
            })
        })
        .collect()
}

/// Draw `requested` distinct facets (clamped into `1..=facet_count`) uniformly
/// without replacement.
pub fn sample_seeds<R: Rng + ?Sized>(
    facet_count: u32,
    requested: usize,
    rng: &mut R,
) -> Vec<FacetId> {
    let mut pool: Vec<FacetId> = (0..facet_count).collect();
    let count = requested.clamp(1, pool.len().max(1)).min(pool.len());
    let mut seeds = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = rng.gen_range(0..pool.len());
        seeds.push(pool.swap_remove(pick));
    }
    seeds
}

fn mean_error(assignments: &[ProxyAssignment]) -> f32 {
    assignments.iter().map(|a| a.error).sum::<f32>() / assignments.len() as f32
}

/// Offer every proxy to every facet, keeping strictly better fits
fn partition(samples: &[FacetSample], proxies: &[Plane], assignments: &mut [ProxyAssignment]) {
    for (id, proxy) in proxies.iter().enumerate() {
        for (assignment, sample) in assignments.iter_mut().zip(samples) {
            let error = sample.error_to(proxy);
            if error < assignment.error {
                assignment.proxy = Some(id);
                assignment.error = error;
            }
        }
    }
}

/// Move every proxy that owns at least one facet to the mean centroid and
/// normalized mean normal of its facets, returning the worst stored facet error
fn refit(
    samples: &[FacetSample],
    proxies: &mut [Plane],
    assignments: &[ProxyAssignment],
    accumulators: &mut Vec<Accumulator>,
) -> WorstFacet {
    accumulators.clear();
    accumulators.resize(proxies.len(), Accumulator::default());

    let mut worst = WorstFacet { facet: 0, error: 0.0 };
    for assignment in assignments {
        if assignment.error > worst.error {
            worst = WorstFacet { facet: assignment.facet, error: assignment.error };
        }

        let Some(proxy) = assignment.proxy else {
            continue;
        };
        let sample = &samples[assignment.facet as usize];
        let acc = &mut accumulators[proxy];
        if acc.count == 0 {
            acc.normal = sample.normal;
            acc.point = sample.centroid.coords;
        } else {
            acc.normal += sample.normal;
            acc.point += sample.centroid.coords;
        }
        acc.count += 1;
    }

    for (proxy, acc) in proxies.iter_mut().zip(accumulators.iter()) {
        if acc.count > 0 {
            proxy.normal = unit(&acc.normal);
            proxy.point = Point3f::from(acc.point / acc.count as f32);
        }
    }
    worst
}

/// Indices of the proxies that own at least one facet
pub fn active_proxies(field: &ProxyField) -> Vec<ProxyId> {
    let mut owns_facets = vec![false; field.proxy_count()];
    for proxy in field.assignments.iter().filter_map(|a| a.proxy) {
        if let Some(flag) = owns_facets.get_mut(proxy) {
            *flag = true;
        }
    }
    owns_facets
        .iter()
        .enumerate()
        .filter_map(|(proxy, &owns)| owns.then_some(proxy))
        .collect()
}
