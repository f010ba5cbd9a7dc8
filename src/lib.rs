pub mod arrival;
pub mod draw;
pub mod error;
pub mod failure;
pub mod gate;
pub mod maintenance;
pub mod output;
pub mod port;
pub mod server;
pub mod sim;

#[cfg(test)]
mod test;
