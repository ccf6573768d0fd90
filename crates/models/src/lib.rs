pub mod errors;
pub mod db;
pub mod user;
pub mod project;
pub mod bid;

#[cfg(test)]
mod tests;
