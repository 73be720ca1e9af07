pub mod action;
pub mod behavior;
pub mod biological;
pub mod ecological;
pub mod particles;
pub mod social;
pub mod stats;
