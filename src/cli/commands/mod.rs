pub mod pages;
pub mod recover;
