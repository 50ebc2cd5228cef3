pub mod amount;
pub mod percentage;
pub mod tick_range;

pub use amount::Amount;
pub use percentage::Percentage;
pub use tick_range::TickRange;
