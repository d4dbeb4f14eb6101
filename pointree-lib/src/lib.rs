pub mod math_enums;
pub mod octree;
pub mod point;
