//! Logic Module - scoring core and its collaborators

pub mod adapter;
pub mod config;
pub mod dashboard;
pub mod emergency;
pub mod inference;
pub mod risk;
pub mod storage;
pub mod workflow;
