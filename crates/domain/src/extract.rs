use std::fmt;

use log::warn;

use crate::{Category, Cell, ExerciseEntry, Grid, WeightedCatalog};

const RESERVED_LABELS: [&str; 2] = ["ratio", "help column"];

/// Non-fatal irregularity encountered while extracting a catalog from a grid.
/// Malformed cells never abort extraction; they are coerced and reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAnomaly {
    UnreadableRatio {
        category: String,
        exercise: String,
        row: usize,
    },
    UnreadableThreshold {
        category: String,
        exercise: String,
        row: usize,
    },
    EmptyCategory {
        category: String,
        column: usize,
        row: usize,
    },
}

impl fmt::Display for ParseAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAnomaly::UnreadableRatio {
                category,
                exercise,
                row,
            } => {
                write!(
                    f,
                    "ratio of {exercise:?} in category {category:?} (row {row}) is not a number, using 0"
                )
            }
            ParseAnomaly::UnreadableThreshold {
                category,
                exercise,
                row,
            } => {
                write!(
                    f,
                    "cumulative threshold of {exercise:?} in category {category:?} (row {row}) is not a number, using 0"
                )
            }
            ParseAnomaly::EmptyCategory {
                category,
                column,
                row,
            } => {
                write!(
                    f,
                    "category {category:?} (column {column}, row {row}) has no exercises and is excluded"
                )
            }
        }
    }
}

struct HeaderSite {
    name: String,
    column: usize,
    row: usize,
}

/// Extracts the weighted category catalog from a decoded grid.
///
/// Pure function of the grid and deterministic for a fixed grid. A grid with
/// no rows or no recognizable headers yields an empty catalog. Anomalies are
/// logged at warn level; use [`extract_with_diagnostics`] to inspect them.
#[must_use]
pub fn extract(grid: &Grid) -> WeightedCatalog {
    let (catalog, anomalies) = extract_with_diagnostics(grid);
    for anomaly in anomalies {
        warn!("{anomaly}");
    }
    catalog
}

#[must_use]
pub fn extract_with_diagnostics(grid: &Grid) -> (WeightedCatalog, Vec<ParseAnomaly>) {
    let mut anomalies = Vec::new();
    let sites = discover_headers(grid);
    let mut categories = Vec::new();

    for site in &sites {
        let exercises = walk_entries(grid, site, &sites, &mut anomalies);
        if exercises.is_empty() {
            anomalies.push(ParseAnomaly::EmptyCategory {
                category: site.name.clone(),
                column: site.column,
                row: site.row,
            });
            continue;
        }
        categories.push(Category {
            name: site.name.clone(),
            exercises,
            origin_column: site.column,
            origin_row: site.row,
        });
    }

    (WeightedCatalog::new(categories), anomalies)
}

fn discover_headers(grid: &Grid) -> Vec<HeaderSite> {
    let mut sites = Vec::new();
    for row in 0..grid.rows() {
        for (column, cell) in grid.row(row).iter().enumerate() {
            let Some(text) = cell.text() else { continue };
            let name = if text.ends_with(':') {
                colon_header(text)
            } else {
                labeled_header(
                    text.trim(),
                    grid.cell(row, column + 1),
                    grid.cell(row, column + 2),
                )
            };
            if let Some(name) = name {
                sites.push(HeaderSite { name, column, row });
            }
        }
    }
    sites
}

/// Colon rule: `Squats:` names the category `Squats`. Reserved column labels
/// are not categories.
fn colon_header(text: &str) -> Option<String> {
    let name = text.strip_suffix(':')?.trim();
    if is_reserved_label(name) {
        return None;
    }
    Some(name.to_string())
}

/// Neighbor-label rule: an unpunctuated header is recognizable only by the
/// "ratio" and "help" column labels immediately to its right.
fn labeled_header(text: &str, ratio_label: &Cell, help_label: &Cell) -> Option<String> {
    if text.len() <= 2 || is_reserved_label(text) {
        return None;
    }
    if cell_contains(ratio_label, "ratio") && cell_contains(help_label, "help") {
        Some(text.to_string())
    } else {
        None
    }
}

fn is_reserved_label(name: &str) -> bool {
    RESERVED_LABELS.contains(&name.to_lowercase().as_str())
}

fn cell_contains(cell: &Cell, label: &str) -> bool {
    cell.text()
        .is_some_and(|text| text.to_lowercase().contains(label))
}

fn walk_entries(
    grid: &Grid,
    site: &HeaderSite,
    sites: &[HeaderSite],
    anomalies: &mut Vec<ParseAnomaly>,
) -> Vec<ExerciseEntry> {
    let start_row = site.row + 1;
    let mut exercises = Vec::new();

    for row in start_row..grid.rows() {
        let Some(text) = grid.cell(row, site.column).text() else {
            break;
        };
        let name = text.trim();
        if name.is_empty() {
            break;
        }
        // A new header ends the category without being consumed.
        if name.ends_with(':') {
            break;
        }
        // A known header name repeated deeper in the column also ends the
        // category, but only past the start row.
        if row > start_row && sites.iter().any(|s| s.name == name) {
            break;
        }

        let ratio = grid.cell(row, site.column + 1).number().unwrap_or_else(|| {
            anomalies.push(ParseAnomaly::UnreadableRatio {
                category: site.name.clone(),
                exercise: name.to_string(),
                row,
            });
            0.0
        });
        let cumulative_threshold =
            grid.cell(row, site.column + 2).number().unwrap_or_else(|| {
                anomalies.push(ParseAnomaly::UnreadableThreshold {
                    category: site.name.clone(),
                    exercise: name.to_string(),
                    row,
                });
                0.0
            });

        exercises.push(ExerciseEntry {
            name: name.to_string(),
            ratio,
            cumulative_threshold,
        });
    }

    exercises
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn squats_grid() -> Grid {
        Grid::new(vec![
            vec!["Squats:".into(), "Ratio".into(), "Help Column".into()],
            vec!["Back Squat".into(), 40.into(), 40.into()],
            vec!["Front Squat".into(), 30.into(), 70.into()],
            vec!["Overhead Squat".into(), 30.into(), 100.into()],
        ])
    }

    #[rstest]
    #[case("Squats:", Some("Squats"))]
    #[case("Olympic Lifts:", Some("Olympic Lifts"))]
    #[case("  Squats:", Some("Squats"))]
    #[case(" Pulls : ", None)]
    #[case("Ratio:", None)]
    #[case("RATIO:", None)]
    #[case("Help Column:", None)]
    fn test_colon_header(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(colon_header(text).as_deref(), expected, "colon_header({text:?})");
    }

    #[rstest]
    #[case("Deadlifts", "Ratio", "Help Column", Some("Deadlifts"))]
    #[case("Deadlifts", "ratio (%)", "help", Some("Deadlifts"))]
    #[case("Deadlifts", "Help Column", "Ratio", None)]
    #[case("Deadlifts", "Ratio", "Notes", None)]
    #[case("AB", "Ratio", "Help Column", None)]
    #[case("Ratio", "Ratio", "Help Column", None)]
    #[case("Help Column", "Ratio", "Help Column", None)]
    fn test_labeled_header(
        #[case] text: &str,
        #[case] right1: &str,
        #[case] right2: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            labeled_header(text, &right1.into(), &right2.into()).as_deref(),
            expected
        );
    }

    #[test]
    fn test_labeled_header_requires_text_neighbors() {
        assert_eq!(labeled_header("Deadlifts", &Cell::Absent, &Cell::Absent), None);
        assert_eq!(
            labeled_header("Deadlifts", &40.into(), &"Help Column".into()),
            None
        );
    }

    #[test]
    fn test_extract_single_category() {
        let catalog = extract(&squats_grid());

        assert_eq!(catalog.len(), 1);
        let category = catalog.find("Squats").unwrap();
        assert_eq!(category.origin_column, 0);
        assert_eq!(category.origin_row, 0);
        assert_eq!(
            category.exercises,
            vec![
                ExerciseEntry {
                    name: "Back Squat".to_string(),
                    ratio: 40.0,
                    cumulative_threshold: 40.0,
                },
                ExerciseEntry {
                    name: "Front Squat".to_string(),
                    ratio: 30.0,
                    cumulative_threshold: 70.0,
                },
                ExerciseEntry {
                    name: "Overhead Squat".to_string(),
                    ratio: 30.0,
                    cumulative_threshold: 100.0,
                },
            ]
        );
    }

    #[test]
    fn test_extract_is_deterministic() {
        assert_eq!(extract(&squats_grid()), extract(&squats_grid()));
    }

    #[test]
    fn test_extract_empty_grid() {
        assert!(extract(&Grid::default()).is_empty());
    }

    #[test]
    fn test_extract_no_headers() {
        let grid = Grid::new(vec![vec!["Back Squat".into(), 40.into(), 40.into()]]);
        assert!(extract(&grid).is_empty());
    }

    #[test]
    fn test_extract_side_by_side_categories() {
        let grid = Grid::new(vec![
            vec![
                "Squats:".into(),
                "Ratio".into(),
                "Help Column".into(),
                Cell::Absent,
                "Pulls:".into(),
                "Ratio".into(),
                "Help Column".into(),
            ],
            vec![
                "Back Squat".into(),
                60.into(),
                60.into(),
                Cell::Absent,
                "Pull Up".into(),
                100.into(),
                100.into(),
            ],
            vec!["Front Squat".into(), 40.into(), 100.into()],
        ]);
        let catalog = extract(&grid);

        assert_eq!(
            catalog.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Squats", "Pulls"]
        );
        assert_eq!(catalog.find("Squats").unwrap().exercises.len(), 2);
        let pulls = catalog.find("Pulls").unwrap();
        assert_eq!(pulls.exercises.len(), 1);
        assert_eq!(pulls.origin_column, 4);
    }

    #[test]
    fn test_extract_labeled_header_category() {
        let grid = Grid::new(vec![
            vec!["Deadlifts".into(), "Ratio".into(), "Help Column".into()],
            vec!["Conventional".into(), 70.into(), 70.into()],
            vec!["Sumo".into(), 30.into(), 100.into()],
        ]);
        let catalog = extract(&grid);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("Deadlifts").unwrap().exercises.len(), 2);
    }

    #[test]
    fn test_walk_stops_at_next_colon_header() {
        let grid = Grid::new(vec![
            vec!["Squats:".into()],
            vec!["Back Squat".into(), 100.into(), 100.into()],
            vec!["Presses:".into()],
            vec!["Push Press".into(), 100.into(), 100.into()],
        ]);
        let catalog = extract(&grid);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("Squats").unwrap().exercises.len(), 1);
        assert_eq!(catalog.find("Presses").unwrap().exercises.len(), 1);
    }

    #[test]
    fn test_walk_stops_at_repeated_header_name() {
        // "Deadlifts" is a labeled header deeper in the same column. The walk
        // for "Squats" must not swallow it or its exercises.
        let grid = Grid::new(vec![
            vec!["Squats:".into()],
            vec!["Back Squat".into(), 100.into(), 100.into()],
            vec!["Deadlifts".into(), "Ratio".into(), "Help Column".into()],
            vec!["Sumo".into(), 100.into(), 100.into()],
        ]);
        let catalog = extract(&grid);

        assert_eq!(
            catalog.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Squats", "Deadlifts"]
        );
        assert_eq!(
            catalog.find("Squats").unwrap().exercises[0].name,
            "Back Squat"
        );
        assert_eq!(catalog.find("Deadlifts").unwrap().exercises[0].name, "Sumo");
    }

    #[test]
    fn test_walk_stops_at_blank_cell() {
        let grid = Grid::new(vec![
            vec!["Squats:".into()],
            vec!["Back Squat".into(), 100.into(), 100.into()],
            vec![Cell::Absent],
            vec!["Stray Row".into(), 50.into(), 50.into()],
        ]);
        let catalog = extract(&grid);

        assert_eq!(catalog.find("Squats").unwrap().exercises.len(), 1);
    }

    #[test]
    fn test_unparsable_numbers_coerce_to_zero_with_anomalies() {
        let grid = Grid::new(vec![
            vec!["Squats:".into()],
            vec!["Back Squat".into(), "n/a".into()],
        ]);
        let (catalog, anomalies) = extract_with_diagnostics(&grid);

        assert_eq!(
            catalog.find("Squats").unwrap().exercises,
            vec![ExerciseEntry {
                name: "Back Squat".to_string(),
                ratio: 0.0,
                cumulative_threshold: 0.0,
            }]
        );
        assert_eq!(
            anomalies,
            vec![
                ParseAnomaly::UnreadableRatio {
                    category: "Squats".to_string(),
                    exercise: "Back Squat".to_string(),
                    row: 1,
                },
                ParseAnomaly::UnreadableThreshold {
                    category: "Squats".to_string(),
                    exercise: "Back Squat".to_string(),
                    row: 1,
                },
            ]
        );
    }

    #[test]
    fn test_empty_category_excluded() {
        let grid = Grid::new(vec![vec!["Squats:".into()]]);
        let (catalog, anomalies) = extract_with_diagnostics(&grid);

        assert!(catalog.is_empty());
        assert_eq!(
            anomalies,
            vec![ParseAnomaly::EmptyCategory {
                category: "Squats".to_string(),
                column: 0,
                row: 0,
            }]
        );
    }

    #[test]
    fn test_duplicate_category_names_kept_separate() {
        let grid = Grid::new(vec![
            vec!["Squats:".into(), Cell::Absent, Cell::Absent, Cell::Absent, "Squats:".into()],
            vec![
                "Back Squat".into(),
                100.into(),
                100.into(),
                Cell::Absent,
                "Goblet Squat".into(),
                100.into(),
                100.into(),
            ],
        ]);
        let catalog = extract(&grid);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.find("Squats").unwrap().exercises[0].name,
            "Back Squat"
        );
    }

    #[test]
    fn test_thresholds_non_decreasing() {
        let catalog = extract(&squats_grid());
        for category in &catalog {
            for pair in category.exercises.windows(2) {
                assert!(pair[0].cumulative_threshold <= pair[1].cumulative_threshold);
            }
        }
    }
}
