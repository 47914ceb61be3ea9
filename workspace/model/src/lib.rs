pub mod categories;
pub mod entities;
pub mod record;

pub use categories::UnknownVariant;
pub use record::MoneyRecord;
