use rand::Rng;

/// Error returned when a sample cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SampleError {
    #[display("cannot sample from an empty population")]
    EmptyPopulation,
    #[display("sample size must be at least 1")]
    ZeroSampleSize,
}

/// Draws `sample_size` values from `population` with replacement.
///
/// Each value is picked by an index chosen uniformly at random, independently
/// of every other draw, so the same element may appear several times.
///
/// # Examples
///
/// ```
/// use cltlab_sim::{Seed, sampler::draw_sample};
///
/// let population = [1.0, 2.0, 3.0];
/// let mut rng = Seed::from_u128(3).rng();
/// let sample = draw_sample(&population, 5, &mut rng).unwrap();
/// assert_eq!(sample.len(), 5);
/// assert!(sample.iter().all(|v| population.contains(v)));
/// ```
pub fn draw_sample<R>(
    population: &[f64],
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<f64>, SampleError>
where
    R: Rng + ?Sized,
{
    if population.is_empty() {
        return Err(SampleError::EmptyPopulation);
    }
    if sample_size == 0 {
        return Err(SampleError::ZeroSampleSize);
    }
    Ok((0..sample_size)
        .map(|_| population[rng.random_range(0..population.len())])
        .collect())
}
