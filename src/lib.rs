pub mod app;
pub mod config;
pub mod error;
pub mod slug;
pub mod views;
pub mod api {
    pub mod blog;
    pub mod errors;
    pub mod forms;
    pub mod menu;
    pub mod pages;
    pub mod photos;
}
pub mod auth {
    pub mod login;
    pub mod middleware;
    pub mod session;
}
pub mod db {
    pub mod blog_repository;
    pub mod models;
    pub mod page_repository;
    pub mod photo_repository;
    pub mod query;
}
pub mod rendering {
    pub mod templates;
}
pub mod storage {
    pub mod client;
}
