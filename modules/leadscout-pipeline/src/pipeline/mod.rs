pub mod boundary;
pub mod executor;
pub mod stages;


pub use executor::DeadlineExecutor;
pub use stages::LeadPipeline;
