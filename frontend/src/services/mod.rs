pub mod api;
pub mod dialogs;

pub use api::{ApiService, SchedulingApi};
pub use dialogs::{BrowserDialogs, Dialogs};
