#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod extract;
pub mod grid;
pub mod selection;
pub mod template;
pub mod workout;

pub use catalog::{Category, ExerciseEntry, WeightedCatalog};
pub use extract::{ParseAnomaly, extract, extract_with_diagnostics};
pub use grid::{Cell, Grid};
pub use selection::{EmptyCategoryError, Pick, select};
pub use template::{
    CardioKind, DailyTemplate, Day, DayError, TemplateNotFoundError, resolve,
};
pub use workout::{
    AssemblyError, CardioBranch, DrawSource, GeneratedWorkout, Metcon, PickedExercise, assemble,
};
