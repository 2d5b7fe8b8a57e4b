/// A weighted exercise pool entry. `cumulative_threshold` is the upper bound,
/// on a 0 to 100 scale, of the selection range assigned to the exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub name: String,
    pub ratio: f64,
    pub cumulative_threshold: f64,
}

/// A named, weighted pool of exercises discovered in a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub exercises: Vec<ExerciseEntry>,
    pub origin_column: usize,
    pub origin_row: usize,
}

/// Categories in discovery order. Immutable after construction and safe to
/// share across workout generations.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeightedCatalog {
    categories: Vec<Category>,
}

impl WeightedCatalog {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// First category with the given name. Duplicate-named categories coexist
    /// as separate entries; lookups resolve to the earliest discovery.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }
}

impl<'a> IntoIterator for &'a WeightedCatalog {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
