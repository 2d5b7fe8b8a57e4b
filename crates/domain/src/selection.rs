use crate::{Category, ExerciseEntry};

/// The result of one weighted selection. `draw_percentage` is the raw draw
/// scaled to 0 to 100, kept for display regardless of which entry matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick<'a> {
    pub entry: &'a ExerciseEntry,
    pub draw_percentage: f64,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("no exercises in category {0:?}")]
pub struct EmptyCategoryError(pub String);

/// Picks one entry from a category using cumulative-threshold ranges.
///
/// Entry *i* owns the inclusive range from the previous entry's threshold
/// (0 for the first entry) up to its own threshold; the first qualifying
/// range wins. A draw above the last threshold resolves to the last entry,
/// so selection never fails for a non-empty category.
pub fn select(category: &Category, draw: f64) -> Result<Pick<'_>, EmptyCategoryError> {
    let Some(last) = category.exercises.last() else {
        return Err(EmptyCategoryError(category.name.clone()));
    };

    let draw_percentage = draw * 100.0;

    let mut lower_bound = 0.0;
    for entry in &category.exercises {
        if lower_bound <= draw_percentage && draw_percentage <= entry.cumulative_threshold {
            return Ok(Pick {
                entry,
                draw_percentage,
            });
        }
        lower_bound = entry.cumulative_threshold;
    }

    Ok(Pick {
        entry: last,
        draw_percentage,
    })
}
