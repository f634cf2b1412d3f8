//! Beverage catalog web application: a JSON CRUD API over a drink document
//! store, an image upload endpoint backed by a blob store, and server-rendered
//! catalog pages (list/search/paginate, detail, create/update/delete forms).

pub mod app;
pub mod blobs;
pub mod config;
pub mod drinks;
pub mod error;
pub mod images;
pub mod pages;
pub mod state;
pub mod store;
pub mod view;
