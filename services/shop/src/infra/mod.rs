pub mod credential;
pub mod db;
