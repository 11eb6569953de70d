use hpcds_core::Vector3;

use crate::batch::plan_batches;

/// Tunable limits for [`plan_url_batches`] and [`crate::plan_write_batches`].
///
/// These are process-wide tunables rather than recompile-time constants, so
/// both live on a config value with a documented default instead of a
/// `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum length, in bytes, of one batched read URL.
    pub max_url_len: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_url_len: 2048 }
    }
}

/// One planned batch: the URL to request and the original input indices it
/// covers, in the order their block payloads will appear in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBatch {
    /// Fully-built request URL for this batch.
    pub url: String,
    /// Indices into the caller's original coordinate list this batch
    /// covers, in request order.
    pub indices: Vec<usize>,
}

/// Groups an ordered list of block coordinates into batched request URLs
/// under `config.max_url_len`.
///
/// Each coordinate contributes a six-segment suffix
/// `/cx/cy/cz/timepoint/channel/angle` to the URL under construction;
/// whenever appending the next suffix would make the URL longer than
/// `config.max_url_len`, the current URL is emitted and a fresh one is
/// started from `session_url`. A suffix that exactly reaches the limit is
/// still included (strict `>` test, not `>=`).
///
/// Every input index appears in exactly one returned batch, and batches
/// preserve input order within themselves and across the returned
/// sequence.
pub fn plan_url_batches(
    session_url: &str,
    coords: &[Vector3<i32>],
    timepoint: i32,
    channel: i32,
    angle: i32,
    config: &PlannerConfig,
) -> Vec<UrlBatch> {
    let suffixes: Vec<String> = coords
        .iter()
        .map(|c| format!("/{}/{}/{}/{}/{}/{}", c.x, c.y, c.z, timepoint, channel, angle))
        .collect();

    let batches = plan_batches(
        coords.len(),
        session_url.len(),
        |i| suffixes[i].len(),
        config.max_url_len,
    );

    batches
        .into_iter()
        .map(|indices| {
            let mut url = session_url.to_string();
            for &i in &indices {
                url.push_str(&suffixes[i]);
            }
            UrlBatch { url, indices }
        })
        .collect()
}
