pub mod audit;
pub mod datagate;
pub mod knowledge;
pub mod trip;
