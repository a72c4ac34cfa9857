pub mod asset;
pub mod camera;
pub mod constants;
pub mod float;
pub mod labels;
pub mod model;
pub mod rotator;
pub mod scene;

pub use asset::*;
pub use camera::*;
pub use float::*;
pub use labels::*;
pub use model::*;
pub use rotator::*;
pub use scene::*;
