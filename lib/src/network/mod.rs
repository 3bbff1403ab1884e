pub mod numeric;
pub mod trainer;
pub mod unit_bank;

pub use numeric::*;
pub use trainer::*;
pub use unit_bank::*;
