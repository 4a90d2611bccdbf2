//! Registration Verification Code
//!
//! Time-based six-digit secret with an explicit rotation interval,
//! injected through [`ServerState`](crate::core::ServerState) rather
//! than living in process globals. Rotation happens lazily on read; no
//! background task.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use rand::Rng;

pub struct VerificationCode {
    rotate_every: Duration,
    state: RwLock<(String, Instant)>,
}

impl VerificationCode {
    pub fn new(rotate_every: Duration) -> Self {
        Self {
            rotate_every,
            state: RwLock::new((generate_code(), Instant::now())),
        }
    }

    /// The currently valid code, rotating it first if it has expired.
    pub fn current(&self) -> String {
        {
            let guard = self.state.read().expect("verification code lock poisoned");
            if guard.1.elapsed() < self.rotate_every {
                return guard.0.clone();
            }
        }
        let mut guard = self.state.write().expect("verification code lock poisoned");
        // another writer may have rotated while we waited
        if guard.1.elapsed() >= self.rotate_every {
            *guard = (generate_code(), Instant::now());
            tracing::info!(target: "verification", "registration code rotated");
        }
        guard.0.clone()
    }

    pub fn verify(&self, code: &str) -> bool {
        self.current() == code
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..6).map(|_| rng.gen_range(0..10).to_string()).collect()
}
