pub mod controller;
pub mod edges;
pub mod imu;
pub mod models;
pub mod observer;
pub mod settings;
pub mod store;
