//! Graph generation parameters.
//!
//! The defaults reproduce the assignment variant `n3 = 1`, `n4 = 1` with seed
//! 4111: eleven vertices and a density constant of `0.835`.

use crate::{
    error::{GraphError, Result},
    generator::{GeneratedGraph, generate_directed, generate_undirected},
    random::{DEFAULT_SEED, MODULUS, RandomStream},
};

/// Variant digit `n3` used by the default configuration.
pub const DEFAULT_VARIANT_N3: u8 = 1;
/// Variant digit `n4` used by the default configuration.
pub const DEFAULT_VARIANT_N4: u8 = 1;

/// Largest vertex count [`GraphConfigBuilder::build`] accepts.
///
/// Both matrices store `n * n` cells, so the cap keeps generation within a
/// few tens of megabytes.
pub const MAX_VERTEX_COUNT: usize = 4096;

/// Validated parameters for one generated graph.
///
/// # Examples
/// ```
/// use graphstep_core::GraphConfigBuilder;
///
/// let config = GraphConfigBuilder::new().build().expect("defaults are valid");
/// assert_eq!(config.seed(), 4111);
/// assert_eq!(config.vertex_count(), 11);
/// assert_eq!(config.density(), 0.835);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphConfig {
    seed: u64,
    vertex_count: usize,
    density: f64,
}

impl GraphConfig {
    /// Returns the stream seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the density constant `k`.
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Generates the directed matrix from a fresh stream and derives its
    /// undirected closure.
    ///
    /// # Errors
    /// Returns [`GraphError::DegenerateSeed`] when the seed cannot start a
    /// stream. [`GraphConfigBuilder::build`] already rejects such seeds.
    pub fn generate(&self) -> Result<GeneratedGraph> {
        let mut stream = RandomStream::try_new(self.seed)?;
        let directed = generate_directed(self.vertex_count, self.density, &mut stream);
        let undirected = generate_undirected(&directed);
        Ok(GeneratedGraph::new(*self, directed, undirected))
    }
}

/// Configures and validates [`GraphConfig`] values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphConfigBuilder {
    seed: u64,
    vertex_count: usize,
    density: f64,
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            vertex_count: variant_vertex_count(DEFAULT_VARIANT_N3),
            density: variant_density(DEFAULT_VARIANT_N3, DEFAULT_VARIANT_N4),
        }
    }
}

impl GraphConfigBuilder {
    /// Creates a builder populated with the default variant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the stream seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the vertex count.
    #[must_use]
    pub const fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    /// Overrides the density constant.
    #[must_use]
    pub const fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Derives vertex count and density from the variant digits:
    /// `n = 10 + n3` and `k = 1.0 - n3 * 0.01 - n4 * 0.005 - 0.15`.
    ///
    /// # Examples
    /// ```
    /// use graphstep_core::GraphConfigBuilder;
    ///
    /// let config = GraphConfigBuilder::new().with_variant(4, 2).build()?;
    /// assert_eq!(config.vertex_count(), 14);
    /// assert_eq!(config.density(), 1.0 - 4.0 * 0.01 - 2.0 * 0.005 - 0.15);
    /// # Ok::<(), graphstep_core::GraphError>(())
    /// ```
    #[must_use]
    pub fn with_variant(mut self, n3: u8, n4: u8) -> Self {
        self.vertex_count = variant_vertex_count(n3);
        self.density = variant_density(n3, n4);
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the configured vertex count.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the configured density constant.
    #[must_use]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyGraph`] for zero vertices,
    /// [`GraphError::TooManyVertices`] above [`MAX_VERTEX_COUNT`],
    /// [`GraphError::InvalidDensity`] for a non-finite or non-positive density
    /// and [`GraphError::DegenerateSeed`] for a seed that reduces to zero.
    pub fn build(self) -> Result<GraphConfig> {
        if self.vertex_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if self.vertex_count > MAX_VERTEX_COUNT {
            return Err(GraphError::TooManyVertices {
                vertex_count: self.vertex_count,
                max: MAX_VERTEX_COUNT,
            });
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(GraphError::InvalidDensity {
                density: self.density,
            });
        }
        if self.seed.is_multiple_of(MODULUS) {
            return Err(GraphError::DegenerateSeed {
                seed: self.seed,
                modulus: MODULUS,
            });
        }

        Ok(GraphConfig {
            seed: self.seed,
            vertex_count: self.vertex_count,
            density: self.density,
        })
    }
}

fn variant_vertex_count(n3: u8) -> usize {
    10 + usize::from(n3)
}

// Evaluated left to right so the result matches the reference value bit for bit.
fn variant_density(n3: u8, n4: u8) -> f64 {
    1.0 - f64::from(n3) * 0.01 - f64::from(n4) * 0.005 - 0.15
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn defaults_match_the_reference_variant() {
        let config = GraphConfigBuilder::new()
            .build()
            .expect("defaults are valid");
        assert_eq!(config.seed(), 4111);
        assert_eq!(config.vertex_count(), 11);
        assert_eq!(config.density().to_bits(), 0.835_f64.to_bits());
    }

    #[rstest]
    #[case(0, 0, 10)]
    #[case(1, 1, 11)]
    #[case(9, 3, 19)]
    fn variant_sets_vertex_count(#[case] n3: u8, #[case] n4: u8, #[case] expected: usize) {
        let builder = GraphConfigBuilder::new().with_variant(n3, n4);
        assert_eq!(builder.vertex_count(), expected);
    }

    #[rstest]
    fn rejects_zero_vertices() {
        let err = GraphConfigBuilder::new()
            .with_vertex_count(0)
            .build()
            .expect_err("zero vertices must fail");
        assert_eq!(err, GraphError::EmptyGraph);
    }

    #[rstest]
    #[case(MAX_VERTEX_COUNT + 1)]
    #[case(1 << 33)]
    #[case(usize::MAX)]
    fn rejects_oversized_graphs(#[case] vertex_count: usize) {
        let err = GraphConfigBuilder::new()
            .with_vertex_count(vertex_count)
            .build()
            .expect_err("oversized graphs must fail");
        assert_eq!(
            err,
            GraphError::TooManyVertices {
                vertex_count,
                max: MAX_VERTEX_COUNT
            }
        );
    }

    #[rstest]
    fn accepts_the_largest_supported_graph() {
        let config = GraphConfigBuilder::new()
            .with_vertex_count(MAX_VERTEX_COUNT)
            .build()
            .expect("the cap itself is valid");
        assert_eq!(config.vertex_count(), MAX_VERTEX_COUNT);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_densities(#[case] density: f64) {
        let err = GraphConfigBuilder::new()
            .with_density(density)
            .build()
            .expect_err("density must be rejected");
        assert!(matches!(err, GraphError::InvalidDensity { .. }));
    }

    #[rstest]
    fn rejects_degenerate_seeds() {
        let err = GraphConfigBuilder::new()
            .with_seed(MODULUS * 2)
            .build()
            .expect_err("seed must be rejected");
        assert_eq!(
            err,
            GraphError::DegenerateSeed {
                seed: MODULUS * 2,
                modulus: MODULUS
            }
        );
    }

    #[rstest]
    fn generate_is_repeatable() {
        let config = GraphConfigBuilder::new()
            .build()
            .expect("defaults are valid");
        let first = config.generate().expect("generation succeeds");
        let second = config.generate().expect("generation succeeds");
        assert_eq!(first.directed(), second.directed());
        assert_eq!(first.undirected(), second.undirected());
        assert_eq!(first.config(), &config);
    }
}
