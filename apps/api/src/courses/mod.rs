pub mod catalog;
pub mod handlers;
pub mod recommender;
pub mod search;
