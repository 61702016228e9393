pub mod backend;
pub mod null;
pub mod software;

pub use backend::RenderBackend;
pub use null::NullBackend;
pub use software::{BuiltinSoftwareDrawer, SoftwareBackend, SoftwareDrawStrategy};
