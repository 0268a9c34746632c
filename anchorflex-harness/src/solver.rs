//! Prioritized equality solver.
//!
//! Every rectangle contributes four unknowns (x, y, width, height) and every
//! anchor is a linear expression over them. Constraints are fed strongest
//! tier first into an incrementally reduced row-echelon system: an equation
//! that reduces to `0 == 0` is redundant, one that reduces to `0 == c` is in
//! conflict with stronger (or earlier) equations and is rejected. Unknowns no
//! equation pins down resolve to 0.

use anchorflex::{Attribute, Constraint, ConstraintId, Item, Rect, Size};
use indexmap::IndexMap;

/// Coefficients below this are treated as eliminated.
const EPSILON: f64 = 1e-9;

/// What happened to one equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Added,
    Redundant,
    /// The equation reduced to `0 == residual`.
    Conflict { residual: f64 },
}

#[derive(Debug, Clone)]
struct PivotRow {
    column: usize,
    coefficients: Vec<f64>,
    rhs: f64,
}

/// Dense incremental Gauss-Jordan elimination.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    columns: usize,
    rows: Vec<PivotRow>,
    tolerance: f64,
}

impl LinearSystem {
    pub fn new(columns: usize, tolerance: f64) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            tolerance,
        }
    }

    /// Add `sum(coefficient * unknown) == rhs`.
    pub fn add(&mut self, terms: &[(usize, f64)], rhs: f64) -> Outcome {
        let mut row = vec![0.0; self.columns];
        for &(column, coefficient) in terms {
            row[column] += coefficient;
        }
        let mut rhs = rhs;

        for pivot in &self.rows {
            let factor = row[pivot.column];
            if factor == 0.0 {
                continue;
            }
            for (value, p) in row.iter_mut().zip(&pivot.coefficients) {
                *value -= factor * p;
            }
            rhs -= factor * pivot.rhs;
        }
        for value in &mut row {
            if value.abs() < EPSILON {
                *value = 0.0;
            }
        }

        let best = row
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(column, &v)| (column, v));
        let Some((column, lead)) = best else {
            return if rhs.abs() <= self.tolerance {
                Outcome::Redundant
            } else {
                Outcome::Conflict { residual: rhs }
            };
        };

        for value in &mut row {
            *value /= lead;
        }
        rhs /= lead;
        row[column] = 1.0;

        for existing in &mut self.rows {
            let factor = existing.coefficients[column];
            if factor == 0.0 {
                continue;
            }
            for (value, r) in existing.coefficients.iter_mut().zip(&row) {
                *value -= factor * r;
            }
            existing.coefficients[column] = 0.0;
            existing.rhs -= factor * rhs;
        }

        self.rows.push(PivotRow {
            column,
            coefficients: row,
            rhs,
        });
        Outcome::Added
    }

    /// One value per unknown. Free unknowns are 0.
    pub fn values(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.columns];
        for row in &self.rows {
            values[row.column] = row.rhs;
        }
        values
    }

    pub fn rank(&self) -> usize {
        self.rows.len()
    }
}

/// A rejected required constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub id: ConstraintId,
    pub identifier: Option<String>,
    pub description: String,
    pub residual: f32,
}

/// Frames produced by one layout pass.
#[derive(Debug, Clone, Default)]
pub struct Solution {
    frames: IndexMap<Item, Rect>,
    /// Required constraints that could not be satisfied.
    pub conflicts: Vec<Conflict>,
    /// Optional constraints given up in favour of stronger ones.
    pub dropped: Vec<ConstraintId>,
}

impl Solution {
    pub fn frame(&self, item: Item) -> Option<Rect> {
        self.frames.get(&item).copied()
    }

    pub fn frames(&self) -> impl Iterator<Item = (Item, Rect)> + '_ {
        self.frames.iter().map(|(&item, &rect)| (item, rect))
    }

    pub fn is_consistent(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Column layout: four unknowns per rectangle.
#[derive(Debug, Default)]
struct Unknowns {
    items: IndexMap<Item, usize>,
}

impl Unknowns {
    fn register(&mut self, item: Item) -> usize {
        let next = self.items.len() * 4;
        *self.items.entry(item).or_insert(next)
    }

    fn columns(&self) -> usize {
        self.items.len() * 4
    }

    fn terms(&self, item: Item, attribute: Attribute, scale: f64, out: &mut Vec<(usize, f64)>) {
        let base = self.items[&item];
        let (x, y, w, h) = (base, base + 1, base + 2, base + 3);
        match attribute {
            Attribute::Left => out.push((x, scale)),
            Attribute::Right => out.extend([(x, scale), (w, scale)]),
            Attribute::CenterX => out.extend([(x, scale), (w, 0.5 * scale)]),
            Attribute::Top => out.push((y, scale)),
            Attribute::Bottom => out.extend([(y, scale), (h, scale)]),
            Attribute::CenterY => out.extend([(y, scale), (h, 0.5 * scale)]),
            Attribute::Width => out.push((w, scale)),
            Attribute::Height => out.push((h, scale)),
        }
    }
}

/// Solve `constraints` with the host rectangle fixed at the origin with size `bounds`.
///
/// `items` fixes the order frames are reported in; rectangles that only
/// appear in constraints are appended.
pub fn solve<'a>(
    items: impl IntoIterator<Item = Item>,
    constraints: impl IntoIterator<Item = &'a Constraint>,
    bounds: Size,
    tolerance: f32,
) -> Solution {
    let mut unknowns = Unknowns::default();
    unknowns.register(Item::Host);
    for item in items {
        unknowns.register(item);
    }
    let mut ordered: Vec<&Constraint> = constraints.into_iter().collect();
    for constraint in &ordered {
        unknowns.register(constraint.first().item);
        if let Some(second) = constraint.second() {
            unknowns.register(second.item);
        }
    }
    // Stable: equal priorities keep activation order.
    ordered.sort_by(|a, b| b.priority().0.total_cmp(&a.priority().0));

    let mut system = LinearSystem::new(unknowns.columns(), f64::from(tolerance));
    let host = unknowns.items[&Item::Host];
    for (column, value) in [(0, 0.0), (1, 0.0), (2, bounds.width), (3, bounds.height)] {
        system.add(&[(host + column, 1.0)], f64::from(value));
    }

    let mut solution = Solution::default();
    let mut terms = Vec::with_capacity(4);
    for constraint in ordered {
        terms.clear();
        let first = constraint.first();
        unknowns.terms(first.item, first.attribute, 1.0, &mut terms);
        if let Some(second) = constraint.second() {
            let scale = -f64::from(constraint.multiplier());
            unknowns.terms(second.item, second.attribute, scale, &mut terms);
        }

        match system.add(&terms, f64::from(constraint.constant())) {
            Outcome::Added | Outcome::Redundant => {}
            Outcome::Conflict { residual } if constraint.priority().is_required() => {
                tracing::warn!(
                    constraint = %constraint,
                    residual,
                    "unsatisfiable required constraint"
                );
                solution.conflicts.push(Conflict {
                    id: constraint.id(),
                    identifier: constraint.identifier().map(str::to_owned),
                    description: constraint.to_string(),
                    residual: residual as f32,
                });
            }
            Outcome::Conflict { .. } => {
                tracing::trace!(constraint = %constraint, "dropped optional constraint");
                solution.dropped.push(constraint.id());
            }
        }
    }

    let values = system.values();
    for (&item, &base) in &unknowns.items {
        let rect = Rect::new(
            values[base] as f32,
            values[base + 1] as f32,
            values[base + 2] as f32,
            values[base + 3] as f32,
        );
        solution.frames.insert(item, rect);
    }
    tracing::debug!(
        unknowns = unknowns.columns(),
        rank = system.rank(),
        conflicts = solution.conflicts.len(),
        dropped = solution.dropped.len(),
        "solved layout"
    );
    solution
}
