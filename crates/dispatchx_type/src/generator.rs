use dispatchx_core::{
    backend::Backend,
    error::{Error, Result},
};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Random number source bound to a backend.
pub trait Generator: Send {
    fn backend(&self) -> Backend;

    /// Seed the generator was last (re)seeded with.
    fn initial_seed(&self) -> u64;

    fn manual_seed(&mut self, seed: u64);

    /// Reseeds from entropy and returns the new seed.
    fn seed(&mut self) -> u64;

    fn next_u64(&mut self) -> u64;

    /// Uniform sample in `[from, to)`.
    fn uniform(&mut self, from: f64, to: f64) -> f64;

    fn normal(&mut self, mean: f64, std: f64) -> Result<f64>;

    fn box_clone(&self) -> Box<dyn Generator>;
}

#[derive(Clone)]
pub struct CpuGenerator {
    initial_seed: u64,
    rng: StdRng,
}

impl CpuGenerator {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            initial_seed: seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CpuGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for CpuGenerator {
    fn backend(&self) -> Backend {
        Backend::CPU
    }

    fn initial_seed(&self) -> u64 {
        self.initial_seed
    }

    fn manual_seed(&mut self, seed: u64) {
        self.initial_seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn seed(&mut self) -> u64 {
        let seed = rand::random();
        self.manual_seed(seed);
        seed
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn uniform(&mut self, from: f64, to: f64) -> f64 {
        from + (to - from) * self.rng.gen::<f64>()
    }

    fn normal(&mut self, mean: f64, std: f64) -> Result<f64> {
        if !(std > 0.0 && std.is_finite()) {
            return Err(Error::InvalidArgument(format!("normal expects a positive finite std, got {}", std)));
        }
        let normal = Normal::new(mean, std).map_err(|e| Error::InvalidArgument(e.to_string()))?;
        Ok(normal.sample(&mut self.rng))
    }

    fn box_clone(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}
