pub mod favorites;
pub mod featured;
pub mod providers;
pub mod session;
pub mod theme;

pub use favorites::FavoriteSet;
pub use providers::{CatalogClient, OmdbClient};
pub use session::{CatalogSession, FetchOutcome, Notice, NoticeReceiver, Operation, ResultView};
pub use theme::ThemePreference;
