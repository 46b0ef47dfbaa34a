//! External collaborators: market data fetching and the session calendar.

pub mod error;
pub mod market_data;
pub mod nse;
pub mod retry;
pub mod session;
pub mod yahoo;

pub use error::FetchError;
pub use market_data::{OptionChainProvider, PriceSeriesProvider, StaticMarketData};
pub use nse::NseClient;
pub use retry::RetryPolicy;
pub use session::{FixedSession, MarketHours, SessionCalendar};
pub use yahoo::YahooPriceProvider;
