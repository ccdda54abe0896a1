pub mod animation;
pub mod filter;
pub mod input;
pub mod plugin;
pub mod replication;
pub mod reveal;
pub mod scan;
pub mod scanner;
pub mod spatial;
pub mod subfloor;
pub mod verbs;

pub use input::ScannerInputPlugin;
pub use plugin::{TrayScannerPlugin, TrayScannerSet};
