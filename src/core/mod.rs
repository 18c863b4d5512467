pub mod context;
pub mod driver;
pub mod gpu;
pub mod presenter;
pub mod progress;
pub mod surface;
pub mod timing;
pub mod window;

pub use context::{ContextRole, CurrentContext};
pub use driver::{BatchReport, BenchConfig};
pub use gpu::GpuContext;
pub use presenter::Presenter;
pub use progress::ProgressMeter;
pub use surface::{RenderSurface, SurfaceKind};
pub use timing::{elapsed_ms, FrameClock, PhaseTimings};
pub use window::{WindowReport, WindowState};
