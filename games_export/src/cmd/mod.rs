pub mod export;
pub mod info;

use clap::ValueEnum;
use std::fmt;

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum Division {
    Men,
    Women,
    Both,
}

impl Division {
    /// Upstream division codes; `both` expands to one query per code.
    pub fn codes(&self) -> Vec<u8> {
        match self {
            Division::Men => vec![1],
            Division::Women => vec![2],
            Division::Both => vec![1, 2],
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Division::Men => write!(f, "men"),
            Division::Women => write!(f, "women"),
            Division::Both => write!(f, "both"),
        }
    }
}
