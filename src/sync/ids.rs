//! Temporary identifiers for entities created within one export run

/// Mints `temp_<prefix>_<n>` ids, unique within the generator's lifetime.
///
/// Each export run owns its generator; nothing is shared between runs.
#[derive(Debug, Default)]
pub struct TempIdGenerator {
    next: u64,
}

impl TempIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("temp_{}_{}", prefix, self.next)
    }

    /// Number of ids minted so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}
