//! Deterministic test data.

use std::io::Cursor;

const FIRST_NAMES: [&str; 6] = ["John", "Jane", "Ada", "Alan", "Grace", "Linus"];
const LAST_NAMES: [&str; 5] = ["Doe", "Roe", "Lovelace", "Turing", "Hopper"];

/// Linear congruential generator; reproducible across platforms.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }
}

/// Two well-formed lines.
#[must_use]
pub fn sample_customer_lines() -> Vec<String> {
    vec![
        "1,John,Doe,1000000000".to_string(),
        "2,Jane,Roe,1000000100".to_string(),
    ]
}

/// `n` well-formed customer lines with unique ids `1..=n`.
///
/// # Example
///
/// ```
/// use ironpool::testing::generate_customer_lines;
///
/// let lines = generate_customer_lines(3, 42);
/// assert_eq!(lines.len(), 3);
/// assert!(lines[0].starts_with("1,"));
/// ```
#[must_use]
pub fn generate_customer_lines(n: usize, seed: u64) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    (1..=n)
        .map(|id| {
            let first = FIRST_NAMES[rng.next_u32() as usize % FIRST_NAMES.len()];
            let last = LAST_NAMES[rng.next_u32() as usize % LAST_NAMES.len()];
            let ts = 946_684_800 + i64::from(rng.next_u32() % 1_000_000_000);
            format!("{id},{first},{last},{ts}")
        })
        .collect()
}

/// Join lines with `\n` (trailing newline included) into an in-memory reader.
#[must_use]
pub fn lines_to_input<S: AsRef<str>>(lines: &[S]) -> Cursor<Vec<u8>> {
    let mut buf = Vec::new();
    for line in lines {
        buf.extend_from_slice(line.as_ref().as_bytes());
        buf.push(b'\n');
    }
    Cursor::new(buf)
}

/// `n` pseudo-random integers in `0..n`.
#[must_use]
pub fn random_ints(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = Lcg::new(seed);
    let bound = n.max(1) as u64;
    (0..n)
        .map(|_| (u64::from(rng.next_u32()) % bound) as i64)
        .collect()
}

/// `(key, position)` pairs with many duplicate keys, for stability checks.
///
/// `position` is the element's index in the returned vector.
#[must_use]
pub fn tagged_duplicates(n: usize, distinct_keys: u32, seed: u64) -> Vec<(u32, usize)> {
    let mut rng = Lcg::new(seed);
    let keys = distinct_keys.max(1);
    (0..n).map(|i| (rng.next_u32() % keys, i)).collect()
}
