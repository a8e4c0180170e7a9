use crate::domain::Counter;

/// Payload of the delete-confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub counter_ids: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CountersDeletionMapper;

impl CountersDeletionMapper {
    pub fn map(&self, counters: &[Counter]) -> DeleteConfirmation {
        let message = match counters {
            [single] => format!("Delete \"{}\"?", single.title),
            many => format!("Delete {} counters?", many.len()),
        };
        DeleteConfirmation {
            counter_ids: counters.iter().map(|counter| counter.id.clone()).collect(),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CountersSharingMapper;

impl CountersSharingMapper {
    /// One `"{count} x {title}"` line per counter.
    pub fn map(&self, counters: &[Counter]) -> String {
        counters
            .iter()
            .map(|counter| format!("{} x {}", counter.count, counter.title))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_counter_is_named_in_confirmation() {
        let coffee = Counter::new("Cups of coffee", 2);
        let confirmation = CountersDeletionMapper.map(&[coffee.clone()]);
        assert_eq!(confirmation.message, "Delete \"Cups of coffee\"?");
        assert_eq!(confirmation.counter_ids, vec![coffee.id]);
    }

    #[test]
    fn several_counters_are_summarised() {
        let confirmation = CountersDeletionMapper
            .map(&[Counter::new("a", 0), Counter::new("b", 0), Counter::new("c", 0)]);
        assert_eq!(confirmation.message, "Delete 3 counters?");
    }

    #[test]
    fn sharing_lists_one_line_per_counter() {
        let text = CountersSharingMapper.map(&[Counter::new("Naps", 2), Counter::new("Hot-dogs", 5)]);
        assert_eq!(text, "2 x Naps\n5 x Hot-dogs");
    }
}
