//! Example counter titles offered when creating a counter.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleCategory {
    pub name: String,
    pub examples: Vec<String>,
}

impl ExampleCategory {
    fn new(name: &str, examples: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            examples: examples.iter().map(|example| example.to_string()).collect(),
        }
    }
}

pub fn default_examples() -> Vec<ExampleCategory> {
    vec![
        ExampleCategory::new("Drinks", &["Cups of coffee", "Glasses of water", "Sparkling water"]),
        ExampleCategory::new("Food", &["Hot-dogs", "Cupcakes eaten", "Chicken wings"]),
        ExampleCategory::new("Misc", &["Times sneezed", "Naps", "Day dreaming"]),
    ]
}
