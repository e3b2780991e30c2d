pub mod locker;
pub mod mint_manager;
