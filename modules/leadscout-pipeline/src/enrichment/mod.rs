pub mod organization;

pub use organization::OrganizationChain;
