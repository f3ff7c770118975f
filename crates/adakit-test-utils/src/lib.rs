pub mod helpers;
pub mod mock_runner;

pub use helpers::*;
pub use mock_runner::{MockResponse, MockRunner};
