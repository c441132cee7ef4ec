pub mod create;
pub use create::*;

pub mod donate;
pub use donate::*;

pub mod withdraw;
pub use withdraw::*;
