pub mod bootstrap;
pub mod controller;
pub mod page;

pub use bootstrap::run;
pub use controller::{LoadMode, PageLoader};
pub use page::PageView;
