pub mod db;

pub use db::SnapshotStore;
