//! Page Components

mod oracle;

pub use oracle::OraclePage;
