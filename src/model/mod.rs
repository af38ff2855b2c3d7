pub mod session;
pub mod slot;
pub mod week;

pub use session::{format_time, Session};
pub use slot::{day_name, HalfDay, Slot};
pub use week::{day_label, Week};
