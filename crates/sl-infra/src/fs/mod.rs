mod paths;

pub use paths::{app_data_dir, default_item_store_path};
