use thiserror::Error;

/// Unresolved layout. Every variant means the configuration cannot fit the
/// bodies on the circle and retrying with the same inputs fails the same way.
///
/// `CircleTooSmall` is reported up front when the ring cannot hold the points
/// at all; `UnresolvedCollision` when nudging ran out of attempts. Callers
/// handling an infeasible layout should match the whole enum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(
        "Unresolved collision placing \"{name}\" after {attempts} attempts. \
         Try a smaller collision radius, a larger chart or fewer bodies."
    )]
    UnresolvedCollision { name: String, attempts: usize },
    #[error("Circle too small: {points} points need {required}° at a {tolerance}° collision radius")]
    CircleTooSmall {
        points: usize,
        tolerance: f64,
        required: f64,
    },
}
