mod cell;
mod error;
mod main_page;
pub(crate) mod static_selector;
mod status_table;
pub mod timezone;

pub use cell::{classify, Icons};
pub use error::{Error, Result};
pub use main_page::MainPage;
