pub mod fetcher;
pub mod normalizer;
pub mod writer;
