use serde::{Deserialize, Serialize};

/// A named tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: String,
    pub title: String,
    pub count: u32,
}

impl Counter {
    /// New counter with a random v4 id.
    pub fn new(title: impl Into<String>, count: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            count,
        }
    }
}

/// Partial update applied by `CountersRepository::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CounterUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
}

/// Case-insensitive substring match on titles. `None` or an empty query keeps everything.
pub fn filter_by_query(counters: &[Counter], query: Option<&str>) -> Vec<Counter> {
    let needle = match query.map(str::trim) {
        Some(needle) if !needle.is_empty() => needle.to_lowercase(),
        _ => return counters.to_vec(),
    };
    counters
        .iter()
        .filter(|counter| counter.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Counter> {
        vec![
            Counter::new("Cups of coffee", 3),
            Counter::new("ABC drills", 1),
            Counter::new("Naps", 0),
        ]
    }

    #[test]
    fn empty_query_keeps_all() {
        assert_eq!(filter_by_query(&sample(), None).len(), 3);
        assert_eq!(filter_by_query(&sample(), Some("  ")).len(), 3);
    }

    #[test]
    fn query_is_case_insensitive() {
        let found = filter_by_query(&sample(), Some("abc"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "ABC drills");
    }

    #[test]
    fn new_counters_get_distinct_ids() {
        assert_ne!(Counter::new("a", 0).id, Counter::new("a", 0).id);
    }
}
