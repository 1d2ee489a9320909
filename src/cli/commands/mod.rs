pub mod diagnose;
pub mod extract;
pub mod helper;
pub mod init;
pub mod normalize;
pub mod rewrite;
pub mod sync;
