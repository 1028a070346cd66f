mod common;
mod eligibility;
mod store;
