pub mod match_repo;
pub mod models;
pub mod move_repo;
pub mod tournament_repo;
