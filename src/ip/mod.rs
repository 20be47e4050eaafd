mod external;

pub use external::{get_public_ip, DEFAULT_IP_ENDPOINT};
