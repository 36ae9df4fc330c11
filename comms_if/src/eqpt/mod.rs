//! # Equipment interfaces

pub mod detection;
pub mod head;
