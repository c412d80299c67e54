//! Testing utilities and harness for Glidesheet

pub mod assertions;
pub mod driver;
pub mod script;

pub use assertions::{assert_approx_eq, assert_monotonic, assert_within};
pub use driver::{FrameDriver, FrameRecord, Trace, FRAME_NANOS};
pub use script::GestureScript;

pub mod prelude {
    pub use crate::assertions::{assert_approx_eq, assert_monotonic, assert_within};
    pub use crate::driver::{FrameDriver, FrameRecord, Trace, FRAME_NANOS};
    pub use crate::script::GestureScript;
}
