// Library exports for blog-server
// The seed tool and the integration tests build on these modules

pub mod api;
pub mod config;
pub mod db;
pub mod state;
