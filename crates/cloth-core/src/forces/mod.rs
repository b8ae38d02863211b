pub mod gravity;
pub mod pointer;
