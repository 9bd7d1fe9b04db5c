pub mod mlock;
