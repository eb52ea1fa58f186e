pub mod collision;
pub mod error;
pub mod types;

pub use collision::{
    assemble, assemble_bounded, find_collision, is_in_collision, place_points_in_collision,
    COLLISION_ATTEMPTS_PER_POINT, COLLISION_STEP,
};
pub use error::LayoutError;
pub use types::{LocatedPoint, Universe};
