//! Republishes the config whenever the file on disk changes.

mod manager;


pub use manager::ReloadManager;
