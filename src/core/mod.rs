pub mod clock;
pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod input_queue;
pub mod input_state;

pub use clock::{Clock, FpsCounter};
pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use input_queue::{InputEvent, InputQueue};
pub use input_state::InputState;
