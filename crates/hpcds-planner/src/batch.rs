/// Splits `item_count` items (indices `0..item_count`) into batches such
/// that each batch's total cost — `prefix_cost` once, plus `item_cost(i)`
/// for every index it holds — never exceeds `budget`, using a strict `>`
/// test: an item that would make a batch's cost exactly equal `budget` is
/// still included.
///
/// This is the one generic batching routine both the URL planner (cost =
/// suffix byte length, prefix = session URL length) and the write-batch
/// sizer (cost = one block's encoded payload size, prefix = 0) are built
/// on, the way the original client's pure ordering helpers are reused
/// across more than one call site.
///
/// Every input index appears in exactly one output batch, in input order,
/// and batches themselves are in input order.
pub fn plan_batches(
    item_count: usize,
    prefix_cost: usize,
    item_cost: impl Fn(usize) -> usize,
    budget: usize,
) -> Vec<Vec<usize>> {
    let mut batches = Vec::new();
    let mut current = Vec::new();
    let mut current_cost = prefix_cost;

    for i in 0..item_count {
        let cost = item_cost(i);
        if !current.is_empty() && current_cost + cost > budget {
            batches.push(std::mem::take(&mut current));
            current_cost = prefix_cost;
        }
        current.push(i);
        current_cost += cost;
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_preservation_holds() {
        let batches = plan_batches(23, 0, |_| 3, 10);
        let flattened: Vec<usize> = batches.into_iter().flatten().collect();
        assert_eq!(flattened, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn exact_fit_is_included_not_flushed() {
        // Ten items of cost 1 fit exactly in a budget of 10.
        let batches = plan_batches(10, 0, |_| 1, 10);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 10);
    }

    #[test]
    fn uniform_cost_batches_split_on_count() {
        let batches = plan_batches(25, 0, |_| 1, 10);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 10);
        assert_eq!(batches[1].len(), 10);
        assert_eq!(batches[2].len(), 5);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(plan_batches(0, 0, |_| 1, 10).is_empty());
    }
}
