//! # Identifier Generation
//!
//! Human-readable batch, transaction and barcode codes.
//!
//! ## Formats
//! ```text
//! Batch code:        B  + DDMMYY + 4 random alphanumerics   e.g. B150126X7K2
//! Transaction code:  SAL/EXP/INC + DDMMYY + 3 random        e.g. SAL150126Q4Z
//! Auto barcode:      BAR- + 5 random alphanumerics          e.g. BAR-9PL2M
//! ```
//!
//! ## Contract
//! Codes are generated at request time, not from a database sequence, and
//! carry **no uniqueness guarantee**. A generated barcode that collides with
//! an existing one is absorbed by the upsert semantics of the product layer;
//! batch and transaction codes have no unique index at all. Callers must not
//! assume global uniqueness.
//!
//! ## Determinism
//! Wall clock and RNG are injected so tests can pin both; production uses
//! [`SystemClock`] and an entropy-seeded [`StdRng`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alphabet for random suffixes: uppercase letters and digits only.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// =============================================================================
// Clock
// =============================================================================

/// Source of "now" for date-coded identifiers.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// Purpose prefix for a transaction code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Sale,
    Expense,
    Income,
}

impl TransactionKind {
    /// The 3-letter prefix embedded in the code.
    pub const fn prefix(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "SAL",
            TransactionKind::Expense => "EXP",
            TransactionKind::Income => "INC",
        }
    }
}

// =============================================================================
// Generator
// =============================================================================

/// Generates batch, transaction and barcode identifiers.
///
/// Cheap to clone; clones share the same RNG stream.
#[derive(Clone)]
pub struct IdGenerator {
    clock: Arc<dyn Clock>,
    rng: Arc<Mutex<StdRng>>,
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Production generator: system clock, entropy-seeded RNG.
    pub fn new() -> Self {
        IdGenerator {
            clock: Arc::new(SystemClock),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Deterministic generator for tests: fixed clock, seeded RNG.
    pub fn with_clock_and_seed(clock: impl Clock + 'static, seed: u64) -> Self {
        IdGenerator {
            clock: Arc::new(clock),
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Batch code: `B` + DDMMYY + 4 random alphanumerics.
    ///
    /// One batch code is shared by every line of a bulk import call.
    pub fn batch_code(&self) -> String {
        format!("B{}{}", self.date_part(), self.suffix(4))
    }

    /// Transaction code: 3-letter purpose prefix + DDMMYY + 3 random
    /// alphanumerics.
    pub fn transaction_code(&self, kind: TransactionKind) -> String {
        format!("{}{}{}", kind.prefix(), self.date_part(), self.suffix(3))
    }

    /// Auto-generated barcode for products created without one:
    /// `BAR-` + 5 random alphanumerics.
    pub fn barcode(&self) -> String {
        format!("BAR-{}", self.suffix(5))
    }

    fn date_part(&self) -> String {
        self.clock.now().format("%d%m%y").to_string()
    }

    fn suffix(&self, len: usize) -> String {
        let mut rng = self.rng.lock().expect("id generator rng poisoned");
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn batch_code_format() {
        let ids = IdGenerator::with_clock_and_seed(fixed(), 7);
        let code = ids.batch_code();
        assert_eq!(code.len(), 11);
        assert!(code.starts_with("B150126"));
        assert!(code[7..].bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn transaction_code_prefixes() {
        let ids = IdGenerator::with_clock_and_seed(fixed(), 7);
        assert!(ids
            .transaction_code(TransactionKind::Sale)
            .starts_with("SAL150126"));
        assert!(ids
            .transaction_code(TransactionKind::Expense)
            .starts_with("EXP150126"));
        assert!(ids
            .transaction_code(TransactionKind::Income)
            .starts_with("INC150126"));
        assert_eq!(ids.transaction_code(TransactionKind::Sale).len(), 12);
    }

    #[test]
    fn barcode_format() {
        let ids = IdGenerator::with_clock_and_seed(fixed(), 7);
        let barcode = ids.barcode();
        assert!(barcode.starts_with("BAR-"));
        assert_eq!(barcode.len(), 9);
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let a = IdGenerator::with_clock_and_seed(fixed(), 42);
        let b = IdGenerator::with_clock_and_seed(fixed(), 42);
        assert_eq!(a.batch_code(), b.batch_code());
        assert_eq!(
            a.transaction_code(TransactionKind::Income),
            b.transaction_code(TransactionKind::Income)
        );
    }

    #[test]
    fn clones_share_one_rng_stream() {
        let a = IdGenerator::with_clock_and_seed(fixed(), 42);
        let b = a.clone();
        // Consuming from one clone advances the other.
        let first = a.barcode();
        let second = b.barcode();
        assert_ne!(first, second);
    }
}
