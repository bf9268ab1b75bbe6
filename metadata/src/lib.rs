use lazy_static::lazy_static;

mod sportsbook_info;

pub use sportsbook_info::{Sportsbook, SportsbookInfo};

lazy_static! {
    /// Built-in sportsbook catalog
    pub static ref SPORTSBOOK_INFO: SportsbookInfo =
        SportsbookInfo::new().expect("built-in sportsbook catalog is invalid");
}
