pub mod action;
pub mod activity;
pub mod factor;
pub mod file_formats;
pub mod scope;
