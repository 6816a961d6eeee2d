pub mod verdict;

pub use verdict::extract_verdict;
