pub mod features;
pub mod goal;
pub mod interactions;
pub mod menu;
pub mod nutrients;
pub mod policy;
pub mod ranker;
pub mod scoring;
pub mod timing;
pub mod utils;
