pub mod activities;
pub mod pages;
