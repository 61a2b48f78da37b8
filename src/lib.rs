pub mod cli;
pub mod controller;
pub mod display;
pub mod error;
pub mod frame;
pub mod memory;
pub mod report;
pub mod stretch;
pub mod testbench;
pub mod types;

// Re-export commonly used items
pub use controller::Controller;
pub use report::print_report;
pub use testbench::{PassReport, Testbench};
