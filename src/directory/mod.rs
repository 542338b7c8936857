pub mod error;
pub mod province;
pub mod site_list;
