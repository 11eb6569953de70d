use crate::batch::plan_batches;

/// Tunable limit for [`plan_write_batches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteBatchConfig {
    /// Target total encoded payload size, in bytes, per write POST.
    pub target_batch_bytes: usize,
}

impl Default for WriteBatchConfig {
    fn default() -> Self {
        Self {
            // 128 MiB, matching the server-side request body target.
            target_batch_bytes: 134_217_728,
        }
    }
}

/// Groups `block_count` blocks of uniform `bytes_per_block` encoded size
/// into batches whose total payload size stays at or under
/// `config.target_batch_bytes`, i.e. at most
/// `floor(target_batch_bytes / bytes_per_block)` blocks per batch (at least
/// one block per batch even if a single block alone exceeds the target).
pub fn plan_write_batches(
    block_count: usize,
    bytes_per_block: usize,
    config: &WriteBatchConfig,
) -> Vec<Vec<usize>> {
    plan_batches(block_count, 0, |_| bytes_per_block, config.target_batch_bytes)
}
