pub mod config;

pub use config::{Config, find_config_file, load};
pub use mailgate_common as common;
pub use mailgate_dns as dns;
pub use mailgate_mailer as mailer;
pub use mailgate_validate as validate;
