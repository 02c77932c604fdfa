pub mod list_cache;
pub mod poller;
pub mod result_renderer;
pub mod selection;
pub mod throttle;

pub use list_cache::{initial_selection, order_saved_results, CacheState, LoadTicket};
pub use poller::Poller;
pub use result_renderer::{render_result, DashboardStats, ListRow, ResultView, StatusBadge};
pub use throttle::ThrottleGate;
