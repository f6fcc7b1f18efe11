//! Run-time controls shared by generators and searches

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::errors::AlgorithmError;


/// Cooperative cancellation flag
/// Clones share the flag, so a UI thread can stop a run on a worker thread.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    /// Polled by algorithms between steps
    pub fn check(&self) -> Result<(), AlgorithmError> {
        if self.is_interrupted() {
            Err(AlgorithmError::Interrupted)
        } else {
            Ok(())
        }
    }
}


/// Options every algorithm instance is created with
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Fixed seed for reproducible runs, None draws from the OS
    pub seed: Option<u64>,
    pub interrupt: Interrupt,
}

impl RunOptions {

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_interrupt_is_shared() {
        let interrupt = Interrupt::new();
        let handle = interrupt.clone();
        assert!(interrupt.check().is_ok());

        handle.interrupt();
        assert!(interrupt.is_interrupted());
        assert_eq!(interrupt.check(), Err(AlgorithmError::Interrupted));

        interrupt.reset();
        assert!(!handle.is_interrupted());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let options = RunOptions::seeded(42);
        let mut first = options.rng();
        let mut second = options.rng();
        for _ in 0..8 {
            assert_eq!(first.random_range(0..1000u32), second.random_range(0..1000u32));
        }
    }
}
