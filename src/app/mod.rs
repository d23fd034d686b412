pub mod dispatch;
pub mod logging;
pub mod status;
