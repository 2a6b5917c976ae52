pub mod crypto;
pub mod limits;
pub mod session;
pub mod storage;

pub use session::{Session, SessionToken, StoredUser};
