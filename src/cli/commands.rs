pub mod initdb;
pub mod loan;
pub mod migrate_and_serve;
pub mod serve;

pub use initdb::init_database;
pub use loan::{loan, LoanArgs};
pub use migrate_and_serve::migrate_and_serve;
pub use serve::serve;
