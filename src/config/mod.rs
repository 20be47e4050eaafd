mod settings;

pub use settings::{RecordSpec, Settings, TOKEN_ENV};
