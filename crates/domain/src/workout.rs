use chrono::{DateTime, Utc};
use log::warn;
use rand::Rng;

use crate::{
    CardioKind, DailyTemplate, EmptyCategoryError, WeightedCatalog, selection,
};

/// Injectable randomness capability. Generation is reproducible under test by
/// supplying a scripted source; production callers pass any [`rand::Rng`].
pub trait DrawSource {
    /// Returns the next draw in `[0, 1)`.
    fn draw(&mut self) -> f64;

    /// Uniform index into a non-empty pool of the given length.
    fn pick_index(&mut self, len: usize) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        #[allow(clippy::cast_precision_loss)]
        let index = (self.draw() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: Rng> DrawSource for R {
    fn draw(&mut self) -> f64 {
        self.random()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// A metcon definition from the externally supplied sampling pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metcon {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardioBranch {
    Metcon(Metcon),
    Running,
    Mobility,
    Rest,
}

impl CardioBranch {
    #[must_use]
    pub fn kind(&self) -> CardioKind {
        match self {
            CardioBranch::Metcon(_) => CardioKind::Metcon,
            CardioBranch::Running => CardioKind::Running,
            CardioBranch::Mobility => CardioKind::Mobility,
            CardioBranch::Rest => CardioKind::Rest,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CardioBranch::Metcon(metcon) => &metcon.name,
            CardioBranch::Running => "Running Session",
            CardioBranch::Mobility => "Mobility Session",
            CardioBranch::Rest => "Rest Day",
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            CardioBranch::Metcon(metcon) => &metcon.description,
            CardioBranch::Running => "Cardio running workout",
            CardioBranch::Mobility => "Flexibility and mobility work",
            CardioBranch::Rest => "Recovery and rest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickedExercise {
    pub category: String,
    pub exercise: String,
    pub draw_percentage: f64,
}

/// Created fresh on every generation request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWorkout {
    pub day_key: String,
    pub display_name: String,
    pub warmup: String,
    pub exercises: Vec<PickedExercise>,
    pub cardio: CardioBranch,
    pub generated_at: DateTime<Utc>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("metcon requested with an empty cardio pool")]
    EmptyCardioPool,
    #[error(transparent)]
    EmptyCategory(#[from] EmptyCategoryError),
}

/// Assembles a workout from a resolved template.
///
/// Template categories missing from the catalog are logged and skipped,
/// never fatal. One fresh independent draw is taken per found category, in
/// template order, followed by one pool index when the cardio branch is
/// metcon.
pub fn assemble(
    template: &DailyTemplate,
    catalog: &WeightedCatalog,
    metcon_pool: &[Metcon],
    draws: &mut impl DrawSource,
) -> Result<GeneratedWorkout, AssemblyError> {
    let mut exercises = Vec::with_capacity(template.category_names.len());

    for category_name in &template.category_names {
        let Some(category) = catalog.find(category_name) else {
            warn!("category {category_name:?} not found in catalog");
            continue;
        };
        let pick = selection::select(category, draws.draw())?;
        exercises.push(PickedExercise {
            category: category_name.clone(),
            exercise: pick.entry.name.clone(),
            draw_percentage: pick.draw_percentage,
        });
    }

    let cardio = match template.cardio {
        CardioKind::Metcon => {
            if metcon_pool.is_empty() {
                return Err(AssemblyError::EmptyCardioPool);
            }
            CardioBranch::Metcon(metcon_pool[draws.pick_index(metcon_pool.len())].clone())
        }
        CardioKind::Running => CardioBranch::Running,
        CardioKind::Mobility => CardioBranch::Mobility,
        CardioKind::Rest => CardioBranch::Rest,
    };

    Ok(GeneratedWorkout {
        day_key: template.day.key().to_string(),
        display_name: template.name.clone(),
        warmup: template.warmup.clone(),
        exercises,
        cardio,
        generated_at: Utc::now(),
    })
}
