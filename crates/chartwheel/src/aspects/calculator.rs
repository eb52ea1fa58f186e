use crate::aspects::types::{round_precision, AspectDefinition, AspectMatch, AspectPoint};
use crate::chart::data::{PositionEntry, Positions};
use crate::geometry::{angular_gap, normalize_degrees, FULL_CIRCLE, HALF_CIRCLE};

/// Aspect calculator.
///
/// Holds the reference body set (`to_points`) and the recognized aspects.
/// `radix` compares a set against the reference with self-pairs skipped;
/// `transit` compares a moving set against it and signs precision by
/// direction of approach.
pub struct AspectCalculator<'a> {
    to_points: Option<&'a Positions>,
    aspects: &'a [AspectDefinition],
}

impl<'a> AspectCalculator<'a> {
    pub fn new(to_points: Option<&'a Positions>, aspects: &'a [AspectDefinition]) -> Self {
        Self { to_points, aspects }
    }

    /// Aspects between bodies of one chart. A body never aspects itself.
    ///
    /// Precision is the plain `gap - degree`; its sign has no directional meaning here.
    pub fn radix(&self, points: Option<&Positions>) -> Vec<AspectMatch> {
        let (Some(points), Some(to_points)) = (points, self.to_points) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for (name, entry) in points {
            for (to_name, to_entry) in to_points {
                if name == to_name {
                    continue;
                }
                for aspect in self.aspects {
                    if !Self::has_aspect(entry.longitude, to_entry.longitude, aspect) {
                        continue;
                    }
                    let precision =
                        Self::calc_precision(entry.longitude, to_entry.longitude, aspect.degree);
                    matches.push(build_match(aspect, name, entry, to_name, to_entry, precision));
                }
            }
        }

        finish(matches)
    }

    /// Aspects from transiting `points` to the reference set.
    ///
    /// A body may aspect its own reference position. Precision is negative
    /// while the transiting body approaches exactness and positive once it
    /// separates; retrograde speed flips the sign.
    pub fn transit(&self, points: Option<&Positions>) -> Vec<AspectMatch> {
        let (Some(points), Some(to_points)) = (points, self.to_points) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for (name, entry) in points {
            for (to_name, to_entry) in to_points {
                for aspect in self.aspects {
                    if !Self::has_aspect(entry.longitude, to_entry.longitude, aspect) {
                        continue;
                    }

                    let mut precision =
                        Self::calc_precision(entry.longitude, to_entry.longitude, aspect.degree)
                            .abs();
                    if Self::is_approaching(aspect.degree, to_entry.longitude, entry.longitude) {
                        precision = -precision;
                    }
                    if entry.is_retrograde() {
                        precision = -precision;
                    }

                    matches.push(build_match(aspect, name, entry, to_name, to_entry, precision));
                }
            }
        }

        finish(matches)
    }

    /// Whether the gap between two longitudes lies in the aspect's orb
    pub fn has_aspect(point: f64, to_point: f64, aspect: &AspectDefinition) -> bool {
        aspect.matches_gap(angular_gap(point, to_point))
    }

    /// Actual gap minus the aspect's target degree
    pub fn calc_precision(point: f64, to_point: f64, degree: f64) -> f64 {
        angular_gap(point, to_point) - degree
    }

    /// Whether a body moving forward from `point` is closing in on the exact
    /// aspect angle with `to_point`.
    fn is_approaching(degree: f64, to_point: f64, point: f64) -> bool {
        let mut point = normalize_degrees(point);
        let mut to_point = normalize_degrees(to_point);

        // Rotate the trailing side by the aspect angle so both meet at exactness
        if point > to_point {
            if point - to_point > HALF_CIRCLE {
                point = (point + degree) % FULL_CIRCLE;
            } else {
                to_point = (to_point + degree) % FULL_CIRCLE;
            }
        } else if to_point - point > HALF_CIRCLE {
            to_point = (to_point + degree) % FULL_CIRCLE;
        } else {
            point = (point + degree) % FULL_CIRCLE;
        }

        let (lead, trail) = if (point - to_point).abs() > HALF_CIRCLE {
            (to_point, point)
        } else {
            (point, to_point)
        };
        lead - trail < 0.0
    }
}

fn build_match(
    aspect: &AspectDefinition,
    name: &str,
    entry: &PositionEntry,
    to_name: &str,
    to_entry: &PositionEntry,
    precision: f64,
) -> AspectMatch {
    AspectMatch {
        aspect: aspect.clone(),
        point: AspectPoint {
            name: name.to_string(),
            position: entry.longitude,
        },
        to_point: AspectPoint {
            name: to_name.to_string(),
            position: to_entry.longitude,
        },
        precision: round_precision(precision),
    }
}

/// Sort by exactness, then keep the best match per aspect and unordered pair
fn finish(mut matches: Vec<AspectMatch>) -> Vec<AspectMatch> {
    matches.sort_by(|a, b| a.precision.abs().total_cmp(&b.precision.abs()));

    let mut kept: Vec<AspectMatch> = Vec::with_capacity(matches.len());
    for m in matches {
        if !kept.iter().any(|k| k.same_pair(&m)) {
            kept.push(m);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> AspectDefinition {
        AspectDefinition::new("square", 90.0, 8.0, "#FF4500")
    }

    #[test]
    fn test_has_aspect_orb_edges() {
        let sq = square();
        assert!(AspectCalculator::has_aspect(0.0, 86.0, &sq));
        assert!(AspectCalculator::has_aspect(0.0, 94.0, &sq));
        assert!(!AspectCalculator::has_aspect(0.0, 85.0, &sq));
        assert!(!AspectCalculator::has_aspect(0.0, 95.0, &sq));
        // Across the seam: 350 -> 80 is 90 apart
        assert!(AspectCalculator::has_aspect(350.0, 80.0, &sq));
    }

    #[test]
    fn test_calc_precision() {
        assert!((AspectCalculator::calc_precision(0.0, 86.0, 90.0) + 4.0).abs() < 1e-9);
        assert!((AspectCalculator::calc_precision(358.0, 2.0, 0.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_approaching_conjunction() {
        // Transit at 359 moving forward onto natal 0
        assert!(AspectCalculator::is_approaching(0.0, 0.0, 359.0));
        // Transit at 1 has passed natal 0
        assert!(!AspectCalculator::is_approaching(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_is_approaching_square_both_sides() {
        assert!(AspectCalculator::is_approaching(90.0, 0.0, 86.0));
        assert!(!AspectCalculator::is_approaching(90.0, 0.0, 94.0));
        assert!(AspectCalculator::is_approaching(90.0, 0.0, 266.0));
        assert!(!AspectCalculator::is_approaching(90.0, 0.0, 274.0));
    }

    #[test]
    fn test_missing_sets_yield_empty() {
        let aspects = vec![square()];
        let mut planets = Positions::new();
        planets.insert("Sun".to_string(), PositionEntry::new(0.0));

        let no_reference = AspectCalculator::new(None, &aspects);
        assert!(no_reference.radix(Some(&planets)).is_empty());
        assert!(no_reference.transit(Some(&planets)).is_empty());

        let calculator = AspectCalculator::new(Some(&planets), &aspects);
        assert!(calculator.radix(None).is_empty());
        assert!(calculator.transit(None).is_empty());
    }
}
