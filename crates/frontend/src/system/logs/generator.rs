//! Source of drafts for the "add test log" button.

use contracts::enums::log_level::LogLevel;
use contracts::system::logs::request::LogDraft;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::cell::RefCell;

const SERVICES: [&str; 5] = ["api", "frontend", "database", "auth", "worker"];
const MESSAGES: [&str; 6] = [
    "User logged in successfully",
    "Database connection error",
    "Processing finished",
    "Rate limit reached",
    "Automatic backup completed",
    "Data validation error",
];

pub trait LogDraftGenerator {
    fn generate(&self) -> LogDraft;
}

/// Random level/service/message with a small synthetic payload
pub struct RandomLogGenerator {
    rng: RefCell<StdRng>,
}

impl RandomLogGenerator {
    pub fn new() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomLogGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDraftGenerator for RandomLogGenerator {
    fn generate(&self) -> LogDraft {
        let mut rng = self.rng.borrow_mut();
        let levels = LogLevel::all();
        let level = levels.choose(&mut *rng).cloned().unwrap_or(LogLevel::Info);
        let service = SERVICES.choose(&mut *rng).copied().unwrap_or("api");
        let message = MESSAGES.choose(&mut *rng).copied().unwrap_or(MESSAGES[0]);

        LogDraft::new(level, service, message).with_data(json!({
            "user_id": rng.gen_range(0..1000),
            "ip": format!("192.168.1.{}", rng.gen_range(0..255)),
            "duration_ms": rng.gen_range(0..1000),
        }))
    }
}
