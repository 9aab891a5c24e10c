pub mod camera;
pub mod constants;
pub mod flicker;
pub mod levels;
pub mod nav;
pub mod pick;
pub mod scene;

pub use camera::*;
pub use constants::*;
pub use flicker::*;
pub use levels::*;
pub use nav::*;
pub use pick::*;
pub use scene::*;
