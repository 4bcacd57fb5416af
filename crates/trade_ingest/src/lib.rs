pub mod dates;
pub mod dialect;
pub mod error;
pub mod normalize;
pub mod numeric;

pub use dates::parse_trade_date;
pub use dialect::{detect_dialect, Dialect};
pub use error::NormalizeError;
pub use normalize::{parse_trades_csv, REQUIRED_COLUMNS};
pub use numeric::clean_number;
